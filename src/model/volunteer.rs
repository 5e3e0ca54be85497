use serde::{Deserialize, Serialize};

/// Volunteer identity as returned by `GET /scan/volunteer/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volunteer {
    pub id: String,
    pub name: String,
    pub team: String,
    /// Name in Khmer script.
    pub kh_name: String,
    /// Team name in Khmer script.
    pub kh_team: String,
}
