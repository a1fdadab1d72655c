use serde::{Deserialize, Serialize};

/// The fixed set of categories an expense can be filed under.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
pub enum Category {
    #[default]
    Food,
    Travel,
    Shopping,
    Bills,
    Education,
    Health,
    Misc,
}

serde_plain::derive_display_from_serialize!(Category);
serde_plain::derive_fromstr_from_deserialize!(Category);

impl Category {
    /// Every category, in the order they are offered to the user.
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Travel,
        Category::Shopping,
        Category::Bills,
        Category::Education,
        Category::Health,
        Category::Misc,
    ];

    /// The categories as `(label, value)` pairs for a select control.
    pub fn options() -> Vec<CategoryOption> {
        Self::ALL.iter().map(|&c| CategoryOption::from(c)).collect()
    }
}

/// One entry in the category picker.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CategoryOption {
    pub label: String,
    pub value: Category,
}

impl From<Category> for CategoryOption {
    fn from(value: Category) -> Self {
        Self {
            label: value.to_string(),
            value,
        }
    }
}
