//! Curated heuristic data for filtering and scoring.
//!
//! Every list here is plain configuration: ordered string markers consumed
//! by the gates in [`crate::filter`] and the scorer in [`crate::score`].
//! Tuning happens in this module, never inside the gate logic. Several
//! lists overlap on purpose (e.g. "tutorial" is both a high-value marker
//! and an educational keyword); the roles are kept separate so each signal
//! can be adjusted independently.

/// Domains and markers that disqualify a hit outright.
///
/// Q&A forums and social networks are not learning material; LMS hosts sit
/// behind logins; vendor support/help centers answer tickets, not lessons.
pub const DENYLIST_MARKERS: &[&str] = &[
    // Q&A forum the backend surfaces constantly; always excluded.
    "stackoverflow.com",
    // Social networks.
    "facebook.com",
    "twitter.com",
    "instagram.com",
    "linkedin.com",
    "pinterest.com",
    "reddit.com",
    // Individual videos churn too fast to be stable learning material.
    "youtube.com/watch",
    // LMS hosts: course portals, not public resources.
    "learn.lboro.ac.uk",
    "blackboard.com",
    "canvas.net",
    "moodle.org",
    "brightspace.com",
    // Vendor support and help centers.
    "support.",
    "help.",
];

/// URL markers strongly associated with non-English content.
///
/// A fixed marker list, not a language detector.
pub const NON_ENGLISH_MARKERS: &[&str] = &[
    "zhihu.com",
    "baidu.com",
    "zhidao.baidu.com",
    "douban.com",
    "weibo.com",
    "qq.com",
    "163.com",
    "sina.com.cn",
    "sohu.com",
    "yandex.ru",
    "mail.ru",
    "rambler.ru",
    "naver.com",
    "daum.net",
    ".jp/",
    ".kr/",
    ".cn/",
    ".ru/",
];

/// Path and title markers for LMS login/enrollment pages.
pub const LMS_PATH_MARKERS: &[&str] = &[
    "course/index.php",
    "/lms/",
    "/blackboard/",
    "/moodle/",
    "/canvas/",
    "/brightspace/",
    "student portal",
    "enrollment",
    "registration",
    "login",
    "sign in",
    "my courses",
];

/// High-value educational hosts and markers (+10 when scoring).
///
/// Documentation hosts, well-known learning platforms, and the generic
/// markers that flag tutorial-shaped URLs.
pub const HIGH_VALUE_MARKERS: &[&str] = &[
    "docs.",
    "documentation",
    "tutorialspoint.com",
    "w3schools.com",
    "freecodecamp.org",
    "codecademy.com",
    "coursera.org",
    "udemy.com",
    "edx.org",
    "khanacademy.org",
    "pluralsight.com",
    "realpython.com",
    "javascript.info",
    "react.dev",
    "djangoproject.com",
    "python.org",
    "developer.mozilla.org",
    "web.dev",
    "geeksforgeeks.org",
    "mdn",
    "learn.microsoft.com",
    "tensorflow.org",
    "keras.io",
    "pytorch.org",
    "scikit-learn.org",
    "numpy.org",
    "matplotlib.org",
    "pandas.pydata.org",
    "tutorial",
    "guide",
    "getting-started",
];

/// Medium-value hosts: code hosting and technical blogging (+5 when scoring).
pub const MEDIUM_VALUE_MARKERS: &[&str] = &[
    "github.com",
    "medium.com",
    "dev.to",
    "towardsdatascience.com",
    "css-tricks.com",
    "smashingmagazine.com",
];

/// Educational title keywords accepted by the quality gate.
///
/// Deliberately broader than [`SCORING_KEYWORDS`]: the gate asks "could
/// this be educational at all", the scorer asks "does it advertise itself
/// as a lesson".
pub const QUALITY_GATE_KEYWORDS: &[&str] = &[
    "tutorial",
    "learn",
    "course",
    "documentation",
    "guide",
    "getting started",
    "introduction",
    "basics",
    "fundamentals",
    "how to",
    "example",
    "reference",
    "api",
    "docs",
    "training",
    "getting-started",
    "beginner",
    "overview",
    "crash course",
    "handbook",
    "manual",
    "book",
    "library",
    "framework",
];

/// Educational title keywords worth +3 when scoring.
pub const SCORING_KEYWORDS: &[&str] = &[
    "tutorial",
    "learn",
    "course",
    "documentation",
    "guide",
    "getting started",
    "introduction",
    "basics",
    "fundamentals",
    "how to",
    "example",
    "reference",
    "docs",
];

/// Title phrases that usually mark one-off Q&A threads (−2 when scoring).
pub const LOW_QUALITY_INDICATORS: &[&str] = &[
    "question",
    "answer",
    "error",
    "problem",
    "issue",
    "bug",
    "why does",
    "how do i",
    "what is the difference",
];

/// Host suffixes a returned resource must carry.
pub const ALLOWED_TLDS: &[&str] = &[".com", ".org", ".net", ".io", ".dev", ".edu", ".co.uk"];

/// Host suffixes trusted as educational for the relevance gate.
pub const TRUSTED_EDUCATIONAL_TLDS: &[&str] = &[".edu", ".ac.uk"];

/// Words carrying no search signal, dropped during keyword extraction.
pub const STOP_WORDS: &[&str] = &[
    "the",
    "a",
    "an",
    "and",
    "or",
    "for",
    "with",
    "development",
    "basics",
    "fundamentals",
    "&",
    "environment",
];
