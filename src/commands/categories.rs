use crate::commands::Out;
use crate::model::{Category, CategoryOption};
use crate::Result;

/// Lists the categories an expense can be filed under, as label and value.
pub async fn categories() -> Result<Out<Vec<CategoryOption>>> {
    let options = Category::options();
    let message = options
        .iter()
        .map(|o| o.label.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    Ok(Out::new(message, options))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_categories() {
        let out = categories().await.unwrap();
        let options = out.structure().unwrap();
        assert_eq!(options.len(), 7);
        assert_eq!(options[0].value, Category::Food);
        assert_eq!(out.message().lines().count(), 7);
    }
}
