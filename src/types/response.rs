//! Response type definitions
//!
//! Shapes of the Classic API payloads keysword reads.

use serde::Deserialize;

use super::ComputerId;

/// `GET /JSSResource/computers/name/{name}` response body
///
/// Only the fields needed to resolve an ID are modelled.
#[derive(Debug, Clone, Deserialize)]
pub struct ComputerRecord {
    pub computer: ComputerDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComputerDetail {
    pub general: ComputerGeneral,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComputerGeneral {
    pub id: ComputerId,
    #[serde(default)]
    pub name: Option<String>,
}

impl ComputerRecord {
    /// The computer's numeric ID
    pub fn id(&self) -> &ComputerId {
        &self.computer.general.id
    }
}
