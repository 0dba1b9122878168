use poem_openapi::Object;

/// Dashboard totals for the admin overview
#[derive(Object, Debug)]
pub struct AdminStatsResponse {
    pub total_users: u64,
    pub total_projects: u64,
    pub total_tools: u64,
    pub total_news: u64,
}
