//! Word list for wordy generation
//!
//! A small diceware-style list of common, unambiguous English words.

pub const WORDS: &[&str] = &[
    "acorn", "alpine", "amber", "anchor", "apple", "arrow", "aspen", "atlas",
    "autumn", "badge", "bamboo", "barrel", "basket", "beacon", "birch", "bison",
    "blanket", "blossom", "breeze", "bridge", "bronze", "brook", "butter", "cabin",
    "camera", "candle", "canyon", "carbon", "castle", "cedar", "chalk", "cherry",
    "cinder", "citrus", "clover", "cobalt", "comet", "copper", "coral", "cotton",
    "cradle", "crater", "cricket", "crystal", "cypress", "daisy", "dawn", "delta",
    "denim", "desert", "drift", "eagle", "ember", "engine", "fable", "falcon",
    "feather", "fern", "fiddle", "flint", "forest", "fossil", "fox", "frost",
    "galaxy", "garnet", "geyser", "ginger", "glacier", "goblet", "granite", "grove",
    "harbor", "hazel", "heron", "hickory", "hollow", "honey", "horizon", "iceberg",
    "indigo", "iris", "ivory", "jade", "jasper", "juniper", "kettle", "lagoon",
    "lantern", "lark", "lava", "lemon", "lilac", "linen", "lunar", "magnet",
    "mango", "maple", "marble", "meadow", "mesa", "mint", "mirror", "monsoon",
    "morning", "moss", "mountain", "nectar", "nickel", "north", "oasis", "ocean",
    "olive", "onyx", "opal", "orbit", "orchard", "osprey", "otter", "paddle",
    "pebble", "penguin", "pepper", "pine", "planet", "plum", "pocket", "pond",
    "poplar", "prairie", "prism", "quartz", "quill", "raven", "reef", "ridge",
    "river", "robin", "rocket", "rose", "rust", "saddle", "saffron", "sage",
    "salmon", "sand", "sapphire", "shadow", "shell", "sierra", "silver", "sketch",
    "slate", "snow", "spark", "spruce", "stone", "storm", "summit", "sunset",
    "tangerine", "thistle", "thunder", "tiger", "timber", "topaz", "torch", "trail",
    "tulip", "tundra", "velvet", "violet", "walnut", "waterfall", "willow", "winter",
    "wren", "zephyr",
];
