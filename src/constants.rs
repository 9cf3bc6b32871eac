//! Constants

// for one-shot flash messages
pub(crate) const FLASH_COOKIE_NAME: &str = "flash";
pub(crate) const MSG_INVALID_INPUT: &str = "Invalid input.";
pub(crate) const MSG_CREATED: &str = "Item created.";
pub(crate) const MSG_UPDATED: &str = "Item updated.";
pub(crate) const MSG_DELETED: &str = "Item deleted.";

// for `forge`
pub(crate) const SEED_USER_NAME: &str = "xsj";
pub(crate) const SEED_TODOS: [(&str, &str); 4] = [
    ("The Litter Scheme", "PL"),
    ("OSTEP", "OS"),
    ("计算机程序的构造和解释", "PL"),
    ("算法设计与分析", "Algorithm"),
];
