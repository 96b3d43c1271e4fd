use super::{House, MediaItem, MediaKind, Status};

/// Built-in listings used when no saved board exists or it cannot be read
pub fn initial_houses() -> Vec<House> {
    vec![
        House {
            id: "1".to_string(),
            name: "Alphaville Mansion".to_string(),
            price: "R$ 3.500.000".to_string(),
            description: "High-end home with 5 suites, full gourmet area and heated pool."
                .to_string(),
            address: "Alphaville, Barueri - SP".to_string(),
            cover_image: "https://picsum.photos/800/600?random=1".to_string(),
            status: Status::Traffic,
            gallery: vec![
                MediaItem {
                    id: "g1".to_string(),
                    url: "https://picsum.photos/800/600?random=11".to_string(),
                    kind: MediaKind::Image,
                },
                MediaItem {
                    id: "g2".to_string(),
                    url: "https://picsum.photos/800/600?random=12".to_string(),
                    kind: MediaKind::Image,
                },
            ],
            features: vec![
                "Pool".to_string(),
                "5 Suites".to_string(),
                "Home Automation".to_string(),
            ],
        },
        House {
            id: "2".to_string(),
            name: "Jardins Penthouse".to_string(),
            price: "R$ 2.200.000".to_string(),
            description: "Duplex penthouse with panoramic city views and marble finishes."
                .to_string(),
            address: "Jardins, São Paulo - SP".to_string(),
            cover_image: "https://picsum.photos/800/600?random=2".to_string(),
            status: Status::Highlight,
            gallery: vec![],
            features: vec![
                "Panoramic View".to_string(),
                "Duplex".to_string(),
                "Jacuzzi".to_string(),
            ],
        },
        House {
            id: "3".to_string(),
            name: "Modern Townhouse".to_string(),
            price: "R$ 950.000".to_string(),
            description: "Newly built townhouse in a gated community, ideal for families."
                .to_string(),
            address: "Granja Viana, Cotia - SP".to_string(),
            cover_image: "https://picsum.photos/800/600?random=3".to_string(),
            status: Status::Catalog,
            gallery: vec![],
            features: vec![
                "Gated Community".to_string(),
                "3 Bedrooms".to_string(),
                "Backyard".to_string(),
            ],
        },
        House {
            id: "4".to_string(),
            name: "Industrial Loft".to_string(),
            price: "R$ 680.000".to_string(),
            description: "Industrial-style loft downtown with double-height ceilings."
                .to_string(),
            address: "Centro, Curitiba - PR".to_string(),
            cover_image: "https://picsum.photos/800/600?random=4".to_string(),
            status: Status::Catalog,
            gallery: vec![],
            features: vec!["Double-height Ceiling".to_string(), "Open Plan".to_string()],
        },
    ]
}
