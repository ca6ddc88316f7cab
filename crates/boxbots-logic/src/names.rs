//! The built-in robot name pool.

/// Every name a robot can be given, in roster order.
///
/// Order matters: survivors are handed back out in this order at the start of
/// each shift, and robots tied on the obituary board are listed in this order.
pub static ROBOT_NAMES: &[&str] = &[
    "Bob",
    "Ethan",
    "Ruptert",
    "Nathan",
    "Olivia",
    "John",
    "Jade",
    "Quincy",
    "Dilbert",
    "Sarah",
    "Kristen",
    "Blert",
    "Nine",
    "Fish",
    "Kate",
    "Jessica",
    "Doris",
    "Betty",
    "Jack",
    "K9",
    "Ronald",
    "Jorsh",
    "Tom",
    "Brandon",
    "Russell",
    "Atron",
    "Kevin",
    "Kyle",
    "Jarett",
    "Nikolai",
    "Sebastian",
    "Ana",
    "Devin",
    "Bread",
    "Rerun",
    "Radar",
    "Domo",
    "Roboto",
    "Lucy",
    "Gladis",
    "Mlem",
    "Rick",
    "Maureen",
    "Mike",
    "Kit",
    "Kat",
    "Nora",
    "Keaton",
    "Kathy",
    "Mosh",
    "Dobble",
    "Diskette",
    "Disk",
    "Morty",
    "Dice",
    "Robert Paulson",
    "Armondo",
    "Emily",
    "Zeek",
    "Allons-y Alonso",
];

/// Owned copy of the built-in pool.
pub fn default_names() -> Vec<String> {
    ROBOT_NAMES.iter().map(|n| n.to_string()).collect()
}
