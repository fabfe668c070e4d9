//! Learning resources and helpful links.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Category filter value that disables filtering.
pub const ALL_CATEGORIES: &str = "all";

/// Kind of resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Written guide hosted on the site.
    Guide,
    /// External website.
    Link,
    /// Video channel or course.
    Video,
    /// Tools and supplies guide.
    Tool,
}

/// A learning resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Resource {
    /// Resource ID.
    pub id: u32,
    /// Title.
    pub title: String,
    /// Short description.
    pub description: String,
    /// Resource kind.
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    /// Category key (beginner, care, external, videos, local, tools).
    pub category: String,
    /// Site path or absolute URL.
    pub url: String,
    /// Whether `url` points off-site.
    pub external: bool,
}

fn resource(
    id: u32,
    title: &str,
    description: &str,
    kind: ResourceKind,
    category: &str,
    url: &str,
) -> Resource {
    Resource {
        id,
        title: title.to_string(),
        description: description.to_string(),
        kind,
        category: category.to_string(),
        url: url.to_string(),
        external: url.starts_with("http://") || url.starts_with("https://"),
    }
}

fn all_resources() -> &'static [Resource] {
    static RESOURCES: OnceLock<Vec<Resource>> = OnceLock::new();
    RESOURCES.get_or_init(|| {
        use ResourceKind::*;
        vec![
            resource(
                1,
                "Bonsai Basics: Getting Started",
                "A comprehensive guide covering the fundamentals of bonsai care for new enthusiasts.",
                Guide,
                "beginner",
                "/resources/beginner-guide",
            ),
            resource(
                2,
                "Choosing Your First Bonsai Tree",
                "Learn which species are best for beginners and how to select a healthy tree.",
                Guide,
                "beginner",
                "/resources/first-tree-guide",
            ),
            resource(
                3,
                "Watering 101: The Most Important Skill",
                "Master the art of proper watering - the single most important aspect of bonsai care.",
                Guide,
                "beginner",
                "/resources/watering-guide",
            ),
            resource(
                4,
                "Seasonal Care Calendar",
                "Month-by-month guide to bonsai care tasks in the South Carolina climate.",
                Guide,
                "care",
                "/resources/seasonal-care",
            ),
            resource(
                5,
                "Fertilizing Your Bonsai",
                "Understanding fertilizers, application schedules, and nutrition for healthy trees.",
                Guide,
                "care",
                "/resources/fertilizer-guide",
            ),
            resource(
                6,
                "Bonsai Empire",
                "Excellent online resource with free courses, articles, and a thriving community forum.",
                Link,
                "external",
                "https://www.bonsaiempire.com",
            ),
            resource(
                7,
                "American Bonsai Society",
                "The national organization for bonsai enthusiasts with events, publications, and resources.",
                Link,
                "external",
                "https://www.absbonsai.org",
            ),
            resource(
                8,
                "Bonsai Tonight Blog",
                "Jonas Dupuich's excellent blog with detailed articles on technique and development.",
                Link,
                "external",
                "https://bonsaitonight.com",
            ),
            resource(
                9,
                "Herons Bonsai YouTube Channel",
                "Peter Chan's comprehensive video library covering all aspects of bonsai.",
                Video,
                "videos",
                "https://www.youtube.com/user/HestonsBonsai",
            ),
            resource(
                10,
                "Bonsai Mirai Live",
                "Ryan Neil's professional-level instruction and streaming content.",
                Video,
                "videos",
                "https://live.bonsaimirai.com",
            ),
            resource(
                11,
                "Native Species for SC Bonsai",
                "Guide to collecting and developing native South Carolina trees as bonsai.",
                Guide,
                "local",
                "/resources/native-species",
            ),
            resource(
                12,
                "Local Nurseries & Suppliers",
                "Recommended nurseries and bonsai suppliers in the South Carolina area.",
                Guide,
                "local",
                "/resources/local-suppliers",
            ),
            resource(
                13,
                "Essential Bonsai Tools",
                "What tools you actually need and recommendations for quality purchases.",
                Tool,
                "tools",
                "/resources/tools-guide",
            ),
            resource(
                14,
                "Soil Components & Mixing",
                "Understanding bonsai soil, components, and creating the right mix for your trees.",
                Guide,
                "tools",
                "/resources/soil-guide",
            ),
        ]
    })
}

/// Resources in table order, optionally restricted to one category.
///
/// `None`, `""` and `"all"` return everything. An unknown category returns an
/// empty list.
pub fn list_resources(category: Option<&str>) -> Vec<Resource> {
    match category {
        None | Some("") | Some(ALL_CATEGORIES) => all_resources().to_vec(),
        Some(category) => all_resources()
            .iter()
            .filter(|r| r.category == category)
            .cloned()
            .collect(),
    }
}

/// Distinct categories in order of first appearance.
pub fn resource_categories() -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for r in all_resources() {
        if !categories.contains(&r.category) {
            categories.push(r.category.clone());
        }
    }
    categories
}

/// Look up a resource by ID.
pub fn find_resource(id: u32) -> Option<Resource> {
    all_resources().iter().find(|r| r.id == id).cloned()
}
