//! # Swap Request Wizard
//!
//! The three-step swap request form as a typestate builder. Each step is a
//! distinct type, so a payload cannot be produced before both pilots and a
//! flight have been chosen.
//!
//! ```text
//! SelectingPilots ──confirm_pilots()──▶ SelectingFlight ──select_flight()──▶ Confirming
//!        ▲                                   │    ▲                              │
//!        └────────────back()─────────────────┘    └───────────back()─────────────┘
//!
//! Confirming ──into_payload()──▶ CaseSavePayload
//! ```
//!
//! ```compile_fail
//! use pswap_core::request::*;
//!
//! let draft = SwapRequest::new();
//! // ERROR: no method named `into_payload` found for `SwapRequest<SelectingPilots>`
//! let _ = draft.into_payload(uuid::Uuid::new_v4(), &pswap_core::Timestamp::now());
//! ```
//!
//! The target pilot can only be chosen once a requesting pilot is set, and
//! leaving the pilot step requires two distinct pilots. This is the only
//! place the "requester never equals target" rule is enforced.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::directory::{FlightRecord, PilotRecord};
use crate::error::RequestError;
use crate::normalize::{Scalar, DEFAULT_CARRIER_CODE, OPEN_STATUS_FLAG};
use crate::temporal::Timestamp;

// ─── Step Types ──────────────────────────────────────────────────────

/// Step 1: choose the requesting and the target pilot.
#[derive(Debug, Clone, Default)]
pub struct SelectingPilots {
    requester: Option<PilotRecord>,
    target: Option<PilotRecord>,
}

/// Step 2: choose the flight to swap.
#[derive(Debug, Clone)]
pub struct SelectingFlight {
    requester: PilotRecord,
    target: PilotRecord,
}

/// Step 3: review before submission.
#[derive(Debug, Clone)]
pub struct Confirming {
    requester: PilotRecord,
    target: PilotRecord,
    flight: FlightRecord,
}

mod private {
    pub trait Sealed {}
    impl Sealed for super::SelectingPilots {}
    impl Sealed for super::SelectingFlight {}
    impl Sealed for super::Confirming {}
}

/// Marker trait for the wizard steps. Sealed.
pub trait WizardStep: private::Sealed + std::fmt::Debug {
    /// One-based position of the step in the form.
    fn index() -> u8;

    /// Short label shown in the step indicator.
    fn label() -> &'static str;
}

impl WizardStep for SelectingPilots {
    fn index() -> u8 {
        1
    }
    fn label() -> &'static str {
        "pilots"
    }
}
impl WizardStep for SelectingFlight {
    fn index() -> u8 {
        2
    }
    fn label() -> &'static str {
        "flight"
    }
}
impl WizardStep for Confirming {
    fn index() -> u8 {
        3
    }
    fn label() -> &'static str {
        "confirm"
    }
}

// ─── The Wizard ──────────────────────────────────────────────────────

/// A swap request under construction, parameterized by its current step.
#[derive(Debug, Clone)]
pub struct SwapRequest<S: WizardStep> {
    step: S,
}

impl<S: WizardStep> SwapRequest<S> {
    /// One-based index of the current step.
    pub fn step_index(&self) -> u8 {
        S::index()
    }

    /// Label of the current step.
    pub fn step_label(&self) -> &'static str {
        S::label()
    }
}

impl Default for SwapRequest<SelectingPilots> {
    fn default() -> Self {
        Self::new()
    }
}

impl SwapRequest<SelectingPilots> {
    /// Start an empty request.
    pub fn new() -> Self {
        Self {
            step: SelectingPilots::default(),
        }
    }

    /// The requesting pilot, if chosen.
    pub fn requester(&self) -> Option<&PilotRecord> {
        self.step.requester.as_ref()
    }

    /// The target pilot, if chosen.
    pub fn target(&self) -> Option<&PilotRecord> {
        self.step.target.as_ref()
    }

    /// Set (or replace) the requesting pilot.
    pub fn with_requester(mut self, pilot: PilotRecord) -> Self {
        self.step.requester = Some(pilot);
        self
    }

    /// Clear the requesting pilot. The target is cleared with it.
    pub fn clear_requester(mut self) -> Self {
        self.step.requester = None;
        self.step.target = None;
        self
    }

    /// Set (or replace) the target pilot.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::TargetBeforeRequester`] if no requesting pilot
    /// is set yet.
    pub fn with_target(mut self, pilot: PilotRecord) -> Result<Self, RequestError> {
        if self.step.requester.is_none() {
            return Err(RequestError::TargetBeforeRequester);
        }
        self.step.target = Some(pilot);
        Ok(self)
    }

    /// Clear the target pilot only.
    pub fn clear_target(mut self) -> Self {
        self.step.target = None;
        self
    }

    /// Leave the pilot step.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::MissingPilot`] if either slot is empty, or
    /// [`RequestError::SamePilot`] if both slots hold the same pilot.
    pub fn confirm_pilots(self) -> Result<SwapRequest<SelectingFlight>, RequestError> {
        let requester = self
            .step
            .requester
            .ok_or(RequestError::MissingPilot("requesting"))?;
        let target = self.step.target.ok_or(RequestError::MissingPilot("target"))?;
        let requester_id = requester.id_aims.to_string();
        if requester_id == target.id_aims.to_string() {
            return Err(RequestError::SamePilot(requester_id));
        }
        Ok(SwapRequest {
            step: SelectingFlight { requester, target },
        })
    }
}

impl SwapRequest<SelectingFlight> {
    /// The requesting pilot.
    pub fn requester(&self) -> &PilotRecord {
        &self.step.requester
    }

    /// The target pilot.
    pub fn target(&self) -> &PilotRecord {
        &self.step.target
    }

    /// Choose the flight and move to confirmation.
    pub fn select_flight(self, flight: FlightRecord) -> SwapRequest<Confirming> {
        SwapRequest {
            step: Confirming {
                requester: self.step.requester,
                target: self.step.target,
                flight,
            },
        }
    }

    /// Return to the pilot step with both pilots still selected.
    pub fn back(self) -> SwapRequest<SelectingPilots> {
        SwapRequest {
            step: SelectingPilots {
                requester: Some(self.step.requester),
                target: Some(self.step.target),
            },
        }
    }
}

impl SwapRequest<Confirming> {
    /// The requesting pilot.
    pub fn requester(&self) -> &PilotRecord {
        &self.step.requester
    }

    /// The target pilot.
    pub fn target(&self) -> &PilotRecord {
        &self.step.target
    }

    /// The chosen flight.
    pub fn flight(&self) -> &FlightRecord {
        &self.step.flight
    }

    /// Return to the flight step. The chosen flight is discarded.
    pub fn back(self) -> SwapRequest<SelectingFlight> {
        SwapRequest {
            step: SelectingFlight {
                requester: self.step.requester,
                target: self.step.target,
            },
        }
    }

    /// Produce the case-save payload, stamped with `request_id` and `at`.
    pub fn into_payload(self, request_id: Uuid, at: &Timestamp) -> CaseSavePayload {
        let Confirming {
            requester,
            target,
            flight,
        } = self.step;
        let stamp = at.to_canonical_string();
        CaseSavePayload {
            request_id: request_id.to_string(),
            requesting_pilot_id: requester.id_aims.to_string(),
            requesting_pilot_name: requester.name,
            requesting_pilot_position: requester.position,
            requesting_pilot_email: requester.email,
            target_pilot_id: target.id_aims.to_string(),
            target_pilot_name: target.name,
            target_pilot_position: target.position,
            target_pilot_email: target.email,
            flight_code: DEFAULT_CARRIER_CODE.to_string(),
            flight_number: flight.number,
            departure_airport: flight.departure,
            arrival_airport: flight.arrival,
            flight_date: flight.date,
            created_at: stamp.clone(),
            updated_at: stamp,
            status: OPEN_STATUS_FLAG.to_string(),
        }
    }
}

/// Body of `POST /api/cases/cases_save`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseSavePayload {
    /// Client-generated request id.
    pub request_id: String,
    /// AIMS id of the requesting pilot.
    pub requesting_pilot_id: String,
    /// Name of the requesting pilot.
    pub requesting_pilot_name: String,
    /// Rank code of the requesting pilot.
    pub requesting_pilot_position: String,
    /// Email of the requesting pilot.
    pub requesting_pilot_email: String,
    /// AIMS id of the target pilot.
    pub target_pilot_id: String,
    /// Name of the target pilot.
    pub target_pilot_name: String,
    /// Rank code of the target pilot.
    pub target_pilot_position: String,
    /// Email of the target pilot.
    pub target_pilot_email: String,
    /// Carrier code.
    pub flight_code: String,
    /// Flight number without carrier code.
    pub flight_number: Scalar,
    /// Departure airport IATA code.
    pub departure_airport: String,
    /// Arrival airport IATA code.
    pub arrival_airport: String,
    /// Operating date, `YYYY-MM-DD`.
    pub flight_date: String,
    /// Submission instant.
    pub created_at: String,
    /// Same as `created_at` on creation.
    pub updated_at: String,
    /// Always the open flag for a new request.
    pub status: String,
}
