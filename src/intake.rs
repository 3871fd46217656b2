//! Guided intake state machine
//!
//! Deterministic FSM driving the question sequence: one user message
//! consumed per transition, exactly one input category accepted per stage.
//! Invalid input re-prompts the same stage and never touches the draft,
//! so nothing already collected is ever lost.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BotError, Result};
use crate::finance;
use crate::models::{
    CapacitySpec, FinancialInputs, Language, Location, ManagerType, Report, RoomRecord,
};
use crate::validators::{
    parse_amount, parse_binary_choice, parse_count, parse_doubles, parse_prefixed_choice,
    BinaryChoice, ValidationError,
};

//
// ================= Flow variants =================
//

/// Which intake flow a deployment runs.
///
/// The capacity mode is the single point where the two variants differ:
/// the fixed flow assumes 12 bed-units and skips the room walk entirely,
/// the detailed flow collects every room plus the hall. It also flips the
/// rent/price question order, matching how each variant has always asked.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CapacityMode {
    FixedTwelve,
    RoomsAndHall,
}

//
// ================= Stages =================
//

/// Current position in the question sequence.
///
/// Doubles as the outbound prompt identifier: the room index and the
/// previously entered bed count ride along as stage parameters for the
/// presenter to interpolate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "stage")]
pub enum IntakeStage {
    SelectLanguage,
    SelectLocation,
    EnterRoomCount,
    EnterRoomBeds { room: u32 },
    EnterRoomDoubles { room: u32, beds: u32 },
    EnterHallBeds,
    EnterHallDoubles { beds: u32 },
    EnterBedPrice,
    EnterYearlyRent,
    SelectManager,
}

//
// ================= Draft =================
//

/// Answers collected so far, populated strictly in stage order.
///
/// A later stage never overwrites an earlier field; a rejected input
/// never writes anything at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IntakeDraft {
    pub language: Option<Language>,
    pub location: Option<Location>,
    pub room_count: Option<u32>,
    pub rooms: Vec<RoomRecord>,
    pub hall: Option<RoomRecord>,
    pub bed_price: Option<f64>,
    pub yearly_rent: Option<f64>,
}

impl IntakeDraft {
    /// Freeze the draft into validated model inputs.
    ///
    /// Only callable once every stage has run; a gap means the machine's
    /// transition table is broken, not that the user misbehaved.
    fn freeze(&self, mode: CapacityMode, manager_type: ManagerType) -> Result<FinancialInputs> {
        let missing = |field: &str| BotError::SessionError(format!("draft missing {field}"));

        let capacity = match mode {
            CapacityMode::FixedTwelve => CapacitySpec::FixedUnits,
            CapacityMode::RoomsAndHall => CapacitySpec::RoomsAndHall {
                rooms: self.rooms.clone(),
                hall: self.hall.ok_or_else(|| missing("hall"))?,
            },
        };

        Ok(FinancialInputs {
            location: self.location.ok_or_else(|| missing("location"))?,
            capacity,
            yearly_rent: self.yearly_rent.ok_or_else(|| missing("yearly_rent"))?,
            bed_price: self.bed_price.ok_or_else(|| missing("bed_price"))?,
            manager_type,
        })
    }
}

//
// ================= Step outcome =================
//

/// What a single consumed message produced.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Advance: ask the next stage's question.
    Next(IntakeStage),
    /// Rejected: re-ask the same stage's question with an error category.
    Reprompt {
        stage: IntakeStage,
        error: ValidationError,
    },
    /// Flow finished: draft frozen, report computed, session to be torn down.
    Completed(Report),
}

//
// ================= State machine =================

/// The intake controller. Holds only the flow variant; all per-user state
/// lives in the session's stage + draft.
#[derive(Debug, Clone, Copy)]
pub struct IntakeStateMachine {
    mode: CapacityMode,
}

impl IntakeStateMachine {
    pub fn new(mode: CapacityMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> CapacityMode {
        self.mode
    }

    /// Every flow starts by asking for the language.
    pub fn initial_stage() -> IntakeStage {
        IntakeStage::SelectLanguage
    }

    /// Consume one answer for the current stage.
    ///
    /// On success mutates `stage` (and possibly `draft`) and returns the
    /// outcome; on validation failure both are left exactly as they were.
    pub fn advance(
        &self,
        stage: &mut IntakeStage,
        draft: &mut IntakeDraft,
        input: &str,
    ) -> Result<StepOutcome> {
        let current = *stage;

        let outcome = match self.step(current, draft, input) {
            Ok(outcome) => outcome,
            Err(error) => {
                debug!(?current, ?error, "input rejected, re-prompting");
                return Ok(StepOutcome::Reprompt {
                    stage: current,
                    error,
                });
            }
        };

        match &outcome {
            Step::Next(next) => {
                debug!(?current, ?next, "stage advanced");
                *stage = *next;
                Ok(StepOutcome::Next(*next))
            }
            Step::Finish(manager_type) => {
                let inputs = draft.freeze(self.mode, *manager_type)?;
                let report = finance::compute(&inputs);
                debug!(
                    total_bed_units = report.total_bed_units,
                    true_net_profit = report.true_net_profit_year1,
                    "intake complete, report computed"
                );
                Ok(StepOutcome::Completed(report))
            }
        }
    }

    /// Inner transition: validate, record, pick the next stage.
    ///
    /// Returning `Err` guarantees `draft` was not touched.
    fn step(
        &self,
        stage: IntakeStage,
        draft: &mut IntakeDraft,
        input: &str,
    ) -> std::result::Result<Step, ValidationError> {
        match stage {
            IntakeStage::SelectLanguage => {
                draft.language = Some(match parse_binary_choice(input)? {
                    BinaryChoice::First => Language::English,
                    BinaryChoice::Second => Language::Arabic,
                });
                Ok(Step::Next(IntakeStage::SelectLocation))
            }

            IntakeStage::SelectLocation => {
                draft.location = Some(match parse_binary_choice(input)? {
                    BinaryChoice::First => Location::Dubai,
                    BinaryChoice::Second => Location::Sharjah,
                });
                let next = match self.mode {
                    CapacityMode::FixedTwelve => IntakeStage::EnterYearlyRent,
                    CapacityMode::RoomsAndHall => IntakeStage::EnterRoomCount,
                };
                Ok(Step::Next(next))
            }

            IntakeStage::EnterRoomCount => {
                let count = parse_count(input)?;
                draft.room_count = Some(count);
                // Zero rooms short-circuits straight to the hall
                let next = if count == 0 {
                    IntakeStage::EnterHallBeds
                } else {
                    IntakeStage::EnterRoomBeds { room: 1 }
                };
                Ok(Step::Next(next))
            }

            IntakeStage::EnterRoomBeds { room } => {
                // The bed count rides on the stage until the matching
                // doubles answer is accepted; the draft gains the room
                // only as a complete, validated record.
                let beds = parse_count(input)?;
                Ok(Step::Next(IntakeStage::EnterRoomDoubles { room, beds }))
            }

            IntakeStage::EnterRoomDoubles { room, beds } => {
                let doubles = parse_doubles(input, beds)?;
                draft.rooms.push(RoomRecord { beds, doubles });

                let total = draft.room_count.unwrap_or(room);
                let next = if room < total {
                    IntakeStage::EnterRoomBeds { room: room + 1 }
                } else {
                    IntakeStage::EnterHallBeds
                };
                Ok(Step::Next(next))
            }

            IntakeStage::EnterHallBeds => {
                let beds = parse_count(input)?;
                if beds == 0 {
                    // No hall beds, so no doubles question to ask
                    draft.hall = Some(RoomRecord { beds: 0, doubles: 0 });
                    Ok(Step::Next(IntakeStage::EnterBedPrice))
                } else {
                    Ok(Step::Next(IntakeStage::EnterHallDoubles { beds }))
                }
            }

            IntakeStage::EnterHallDoubles { beds } => {
                let doubles = parse_doubles(input, beds)?;
                draft.hall = Some(RoomRecord { beds, doubles });
                Ok(Step::Next(IntakeStage::EnterBedPrice))
            }

            IntakeStage::EnterBedPrice => {
                draft.bed_price = Some(parse_amount(input)?);
                let next = match self.mode {
                    CapacityMode::FixedTwelve => IntakeStage::SelectManager,
                    CapacityMode::RoomsAndHall => IntakeStage::EnterYearlyRent,
                };
                Ok(Step::Next(next))
            }

            IntakeStage::EnterYearlyRent => {
                draft.yearly_rent = Some(parse_amount(input)?);
                let next = match self.mode {
                    CapacityMode::FixedTwelve => IntakeStage::EnterBedPrice,
                    CapacityMode::RoomsAndHall => IntakeStage::SelectManager,
                };
                Ok(Step::Next(next))
            }

            IntakeStage::SelectManager => {
                let manager_type = match parse_prefixed_choice(input)? {
                    BinaryChoice::First => ManagerType::MajorityPartner,
                    BinaryChoice::Second => ManagerType::StandardPartner,
                };
                Ok(Step::Finish(manager_type))
            }
        }
    }
}

/// Internal transition result, before draft freezing.
enum Step {
    Next(IntakeStage),
    Finish(ManagerType),
}
