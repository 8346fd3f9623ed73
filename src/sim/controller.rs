//! Dispatch controllers for the heat pump and storage tank.

use super::types::{StepDispatch, StepInput, StepState};

/// Per-step dispatch strategy. Implementations are pure: device clamping
/// happens in the engine, so a controller may over-ask.
pub trait Controller {
    /// Decides pump output and storage flows for one step.
    fn dispatch(&self, input: &StepInput, state: &StepState) -> StepDispatch;
}

/// Demand-following controller without storage assistance.
///
/// The pump tracks demand clamped to its feasible set. Forced min-load
/// surplus is offered to the tank, but the tank is never discharged, so
/// demand above nominal power or during pump unavailability goes unmet.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectController;

impl Controller for DirectController {
    fn dispatch(&self, input: &StepInput, state: &StepState) -> StepDispatch {
        if !input.pump_available || input.demand_kw <= 0.0 {
            return StepDispatch::idle();
        }

        let pump_heat_kw = input
            .demand_kw
            .clamp(state.pump_min_heat_kw, state.pump_nominal_heat_kw);

        StepDispatch {
            pump_heat_kw,
            charge_kw: (pump_heat_kw - input.demand_kw).max(0.0),
            discharge_kw: 0.0,
        }
    }
}

/// Storage-aware controller.
///
/// Uses the tank to avoid forced min-load running (small demands are served
/// from storage when possible), to cover demand above nominal power, and to
/// bridge steps where the pump is unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyStorageController;

impl Controller for GreedyStorageController {
    fn dispatch(&self, input: &StepInput, state: &StepState) -> StepDispatch {
        let demand = input.demand_kw;
        if demand <= 0.0 {
            return StepDispatch::idle();
        }

        let available_kw = state.storage_content_kwh / state.dt_hours;

        if !input.pump_available {
            return StepDispatch {
                pump_heat_kw: 0.0,
                charge_kw: 0.0,
                discharge_kw: demand.min(available_kw),
            };
        }

        if demand < state.pump_min_heat_kw {
            if available_kw >= demand {
                // serve the small demand from the tank instead of forcing
                // the pump to min load
                return StepDispatch {
                    pump_heat_kw: 0.0,
                    charge_kw: 0.0,
                    discharge_kw: demand,
                };
            }
            return StepDispatch {
                pump_heat_kw: state.pump_min_heat_kw,
                charge_kw: state.pump_min_heat_kw - demand,
                discharge_kw: 0.0,
            };
        }

        if demand > state.pump_nominal_heat_kw {
            return StepDispatch {
                pump_heat_kw: state.pump_nominal_heat_kw,
                charge_kw: 0.0,
                discharge_kw: (demand - state.pump_nominal_heat_kw).min(available_kw),
            };
        }

        StepDispatch {
            pump_heat_kw: demand,
            charge_kw: 0.0,
            discharge_kw: 0.0,
        }
    }
}
