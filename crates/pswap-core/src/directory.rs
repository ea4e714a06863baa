//! # Crew Directory and Flight Schedule Records
//!
//! Wire types of the two lookup endpoints the swap request wizard consults.
//! Field names follow the upstream column names verbatim.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::identity::PilotId;
use crate::normalize::Scalar;

/// A pilot as returned by the crew directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PilotRecord {
    /// Full name.
    #[serde(rename = "Name")]
    pub name: String,
    /// Directory row id.
    pub id: Scalar,
    /// Rank code, e.g. `CPT` or `FO`.
    #[serde(rename = "Position")]
    pub position: String,
    /// Rank in words, e.g. `Captain`.
    #[serde(rename = "Position_Description", default)]
    pub position_description: String,
    /// Crew-scheduling (AIMS) identifier; this is the pilot id used on cases.
    #[serde(rename = "Id_Aims")]
    pub id_aims: Scalar,
    /// Contact email.
    #[serde(rename = "Email", default)]
    pub email: String,
    /// Home base.
    #[serde(rename = "IATA_Code", default)]
    pub iata_code: String,
}

impl PilotRecord {
    /// The identifier under which this pilot appears on swap cases.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyPilotId`] if the AIMS id is blank.
    pub fn pilot_id(&self) -> Result<PilotId, ValidationError> {
        PilotId::new(self.id_aims.to_string())
    }
}

/// One scheduled flight leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightRecord {
    /// Flight number without carrier code.
    #[serde(rename = "Flt")]
    pub number: Scalar,
    /// Operating date, `YYYY-MM-DD`.
    pub date: String,
    /// Departure airport IATA code.
    #[serde(rename = "Dep")]
    pub departure: String,
    /// Arrival airport IATA code.
    #[serde(rename = "Arr")]
    pub arrival: String,
    /// Scheduled time of departure.
    #[serde(rename = "STD", default)]
    pub scheduled_departure: String,
    /// Scheduled time of arrival.
    #[serde(rename = "STA", default)]
    pub scheduled_arrival: String,
    /// Aircraft registration.
    #[serde(rename = "Reg", default)]
    pub registration: String,
}

impl FlightRecord {
    /// Dash-joined airport pair, e.g. `SDQ-KIN`.
    pub fn route(&self) -> String {
        format!("{}-{}", self.departure.trim(), self.arrival.trim())
    }

    /// Full flight designator under the given carrier code.
    pub fn designator(&self, carrier_code: &str) -> String {
        format!("{carrier_code}{}", self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pilot_record_uses_upstream_keys() {
        let pilot: PilotRecord = serde_json::from_value(serde_json::json!({
            "Name": "Ana Perez",
            "id": 7,
            "Position": "CPT",
            "Position_Description": "Captain",
            "Id_Aims": 12345,
            "Email": "ana@example.com",
            "IATA_Code": "SDQ"
        }))
        .unwrap();
        assert_eq!(pilot.name, "Ana Perez");
        assert_eq!(pilot.pilot_id().unwrap().as_str(), "12345");

        let back = serde_json::to_value(&pilot).unwrap();
        assert_eq!(back["Id_Aims"], 12345);
        assert_eq!(back["Position_Description"], "Captain");
    }

    #[test]
    fn blank_aims_id_is_rejected() {
        let pilot: PilotRecord = serde_json::from_value(serde_json::json!({
            "Name": "Nobody",
            "id": 1,
            "Position": "FO",
            "Id_Aims": " "
        }))
        .unwrap();
        assert_eq!(pilot.pilot_id(), Err(ValidationError::EmptyPilotId));
    }

    #[test]
    fn flight_record_route_and_designator() {
        let flight: FlightRecord = serde_json::from_value(serde_json::json!({
            "Arr": "KIN",
            "date": "2025-04-20",
            "STA": "10:45",
            "Reg": "HI1050",
            "Dep": "SDQ",
            "Flt": 123,
            "STD": "09:30"
        }))
        .unwrap();
        assert_eq!(flight.route(), "SDQ-KIN");
        assert_eq!(flight.designator("DM"), "DM123");
        assert_eq!(flight.registration, "HI1050");
    }
}
