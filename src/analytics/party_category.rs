use serde::{Deserialize, Serialize};

/// Coarse party bucket derived from the free text TCPD party type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PartyCategory {
    National,
    Regional,
    Other,
}

impl PartyCategory {
    pub const ALL: [PartyCategory; 3] = [
        PartyCategory::National,
        PartyCategory::Regional,
        PartyCategory::Other,
    ];

    /// "national" wins over "regional" when both appear.
    pub fn from_tcpd_type(party_type: Option<&str>) -> Self {
        let Some(party_type) = party_type else {
            return PartyCategory::Other;
        };
        let lowered = party_type.to_lowercase();
        if lowered.contains("national") {
            PartyCategory::National
        } else if lowered.contains("regional") {
            PartyCategory::Regional
        } else {
            PartyCategory::Other
        }
    }
}
