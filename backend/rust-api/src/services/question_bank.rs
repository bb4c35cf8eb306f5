use crate::models::Question;

/// Web storage quiz, in presentation order
pub static WEB_STORAGE_QUESTIONS: [Question; 12] = [
    Question {
        prompt: "Which storage method persists even after the browser is closed?",
        options: &[
            "Session Storage",
            "Cookies",
            "Local Storage",
            "All of the above",
        ],
        correct_answer: 2,
        explanation: "LocalStorage data persists until explicitly cleared, even after the browser is closed.",
    },
    Question {
        prompt: "Where is session data typically stored?",
        options: &[
            "In the browser only",
            "On the server",
            "In a database",
            "In the URL",
        ],
        correct_answer: 1,
        explanation: "Session data is typically stored on the server, with only a session ID stored in the browser.",
    },
    Question {
        prompt: "What format is used for JSON data?",
        options: &["Key-value pairs", "XML format", "Plain text", "Binary format"],
        correct_answer: 0,
        explanation: "JSON data is stored as key-value pairs using a specific syntax with curly braces and colons.",
    },
    Question {
        prompt: "What is unique about cookies compared to localStorage?",
        options: &[
            "Cookies can store more data",
            "Cookies are sent with every HTTP request to the server",
            "Cookies can only be accessed via JavaScript",
            "Cookies never expire automatically",
        ],
        correct_answer: 1,
        explanation: "Unlike localStorage, cookies are automatically sent with every HTTP request to the same domain, making them useful for server communications.",
    },
    Question {
        prompt: "What's the main difference between localStorage and sessionStorage?",
        options: &[
            "localStorage is more secure",
            "sessionStorage persists after the browser is closed",
            "localStorage can store more data",
            "sessionStorage is cleared when the page session ends",
        ],
        correct_answer: 3,
        explanation: "sessionStorage is cleared when the page session ends (when the tab is closed), while localStorage persists.",
    },
    Question {
        prompt: "What is the maximum size limit for a single cookie?",
        options: &["About 4KB", "About 50KB", "About 500KB", "About 5MB"],
        correct_answer: 0,
        explanation: "Cookies are limited to about 4KB in size, which is much smaller than localStorage's 5-10MB limit.",
    },
    Question {
        prompt: "Why might a website use API caching with localStorage?",
        options: &[
            "To make the website look better",
            "To reduce server load and improve performance",
            "To prevent users from accessing the data",
            "To collect more user information",
        ],
        correct_answer: 1,
        explanation: "Caching API responses in localStorage reduces the number of network requests, improves performance, and helps stay within API rate limits.",
    },
    Question {
        prompt: "What happens to session data when a user closes their browser?",
        options: &[
            "It remains on the server forever",
            "It's immediately deleted",
            "It's typically deleted after a timeout period",
            "It's transferred to localStorage",
        ],
        correct_answer: 2,
        explanation: "Session data typically remains on the server for a configured timeout period after the user's session ends, then it's deleted.",
    },
    Question {
        prompt: "How can you make a cookie expire?",
        options: &[
            "You can't - cookies always expire automatically after 24 hours",
            "Set the 'expires' or 'max-age' property to a past date or negative value",
            "Delete it from the Application tab in browser devtools",
            "Restart the browser",
        ],
        correct_answer: 1,
        explanation: "To delete a cookie, you set its expiration date to a past date or set its max-age to a negative value. This tells the browser to remove it.",
    },
    Question {
        prompt: "What's the maximum storage capacity typically available for localStorage?",
        options: &["1KB", "500KB", "5-10MB", "Unlimited"],
        correct_answer: 2,
        explanation: "LocalStorage typically has a limit of 5-10MB, though this varies between browsers.",
    },
    Question {
        prompt: "What is an API?",
        options: &[
            "A type of programming language",
            "A database system",
            "An interface that allows different software systems to communicate",
            "A security protocol",
        ],
        correct_answer: 2,
        explanation: "API (Application Programming Interface) allows different software systems to communicate with each other by defining rules for interaction.",
    },
    Question {
        prompt: "Which of these is NOT a valid JavaScript method for working with localStorage?",
        options: &[
            "localStorage.getItem()",
            "localStorage.setItem()",
            "localStorage.removeItem()",
            "localStorage.updateItem()",
        ],
        correct_answer: 3,
        explanation: "localStorage.updateItem() is not a valid method. To update an item, you would use setItem() with the same key.",
    },
];
