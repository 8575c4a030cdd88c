use serde::Deserialize;

/// Facts supplied for a 様式第23号 incident statement
#[derive(Debug, Clone, Deserialize)]
pub struct StatementRequest {
    pub incident_date: String,
    pub location: String,
    /// Role or relationship of the person responsible
    pub perpetrator: String,
    pub behavior: String,
    pub witnesses: String,
    pub diagnosis: String,
    #[serde(default)]
    pub company_response: Option<String>,
}
