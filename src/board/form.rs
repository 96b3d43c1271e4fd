use crate::models::{House, Status};
use serde::{Deserialize, Serialize};

/// Raw input of the "new listing" form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingForm {
    pub name: String,
    pub price: String,
    pub address: String,
    pub description: String,
    /// Comma separated feature tags, as typed
    pub features: String,
    pub cover_image: Option<String>,
}

impl ListingForm {
    /// Feature tags with whitespace trimmed and blanks dropped
    pub fn feature_list(&self) -> Vec<String> {
        split_features(&self.features)
    }

    /// Build a new catalog listing with a fresh id
    pub fn into_house(self) -> House {
        let features = self.feature_list();
        let cover_image = match self.cover_image {
            Some(url) if !url.trim().is_empty() => url.trim().to_string(),
            _ => placeholder_image(),
        };

        House {
            id: uuid::Uuid::new_v4().to_string(),
            name: self.name,
            price: self.price,
            description: self.description,
            address: self.address,
            cover_image,
            status: Status::Catalog,
            gallery: vec![],
            features,
        }
    }
}

pub fn split_features(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}

fn placeholder_image() -> String {
    format!(
        "https://picsum.photos/800/600?random={}",
        uuid::Uuid::new_v4().simple()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_house_defaults() {
        let form = ListingForm {
            name: "Beach House".to_string(),
            price: "R$ 1.200.000".to_string(),
            address: "Guarujá - SP".to_string(),
            description: String::new(),
            features: " Pool, ,Sea View ,".to_string(),
            cover_image: None,
        };

        let house = form.into_house();

        assert_eq!(house.status, Status::Catalog);
        assert_eq!(house.features, vec!["Pool", "Sea View"]);
        assert!(house.gallery.is_empty());
        assert!(house.cover_image.starts_with("https://picsum.photos/800/600?random="));
        assert!(uuid::Uuid::parse_str(&house.id).is_ok());
    }

    #[test]
    fn test_into_house_generates_distinct_ids() {
        let a = ListingForm::default().into_house();
        let b = ListingForm::default().into_house();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_into_house_keeps_given_cover() {
        let form = ListingForm {
            cover_image: Some(" https://example.com/cover.jpg ".to_string()),
            ..Default::default()
        };
        assert_eq!(form.into_house().cover_image, "https://example.com/cover.jpg");
    }
}
