use serde::{Deserialize, Serialize};

/// One generated portfolio, as returned by the generation service.
/// Field names follow the service wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioDescriptor {
    pub id: String,
    pub template_id: String,
    pub name: String,
    pub preview_image: Option<String>,
    pub description: String,
    pub portfolio_url: String,
}

pub fn portfolio_url(id: &str) -> String {
    format!("/portfolio/{id}")
}
