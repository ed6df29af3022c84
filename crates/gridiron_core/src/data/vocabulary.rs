//! Fixed name and label vocabularies the generators draw from.

/// Player first names.
pub const FIRST_NAMES: [&str; 30] = [
    "James", "Robert", "John", "Michael", "David", "William", "Richard", "Joseph", "Thomas",
    "Christopher", "Charles", "Daniel", "Matthew", "Anthony", "Mark", "Donald", "Steven", "Paul",
    "Andrew", "Joshua", "Jackson", "Liam", "Noah", "Aiden", "Lucas", "Caden", "Grayson", "Mason",
    "Elijah", "Logan",
];

/// Player and staff last names.
pub const LAST_NAMES: [&str; 30] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark", "Ramirez", "Lewis", "Robinson",
];

/// League school names.
pub const SCHOOL_NAMES: [&str; 15] = [
    "Lincoln High",
    "Westview Academy",
    "Central Tech",
    "Oak Ridge",
    "Riverdale",
    "Summit Prep",
    "Lakeville North",
    "Valley View",
    "Pinecrest",
    "Meadowbrook",
    "Sterling Heights",
    "Grand Valley",
    "Ironwood",
    "Legacy Christian",
    "Southside",
];

/// Primary team colors.
pub const SCHOOL_COLORS: [&str; 7] = [
    "#ef4444", "#3b82f6", "#10b981", "#f59e0b", "#6366f1", "#8b5cf6", "#000000",
];

/// Secondary color shared by every generated school.
pub const SECONDARY_COLOR: &str = "#ffffff";

/// Offensive coordinator schemes.
pub const OFFENSIVE_PHILOSOPHIES: [&str; 7] = [
    "Air Raid",
    "West Coast",
    "Ground & Pound",
    "Triple Option",
    "Pro-Style",
    "Spread",
    "Power-I",
];

/// Defensive coordinator schemes.
pub const DEFENSIVE_PHILOSOPHIES: [&str; 7] = [
    "Swarm & Punish",
    "Bend Don't Break",
    "No-Fly Zone",
    "4-3 Stack",
    "3-4 Multiple",
    "Tampa 2",
    "Blitz Heavy",
];

/// Support staff programs.
pub const SUPPORT_PHILOSOPHIES: [&str; 5] = [
    "Holistic Development",
    "Grades First",
    "Power Lifting",
    "Olympic Training",
    "Mental Performance",
];

/// Staff universities.
pub const ALMA_MATERS: [&str; 10] = [
    "State University",
    "Tech Institute",
    "Central College",
    "Metropolitan State",
    "Northern University",
    "Southern Poly",
    "Eastern Academy",
    "Western University",
    "A&M State",
    "Land Grant University",
];
