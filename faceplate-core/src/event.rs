//! UI events
//!
//! Everything the monitors report travels through the event channel as one
//! of these values. The "no event" case is `Option::<Event>::None`.

/// Index of a button, encoder or pot within its monitor
pub type ControlId = u16;

/// Control id meaning "no control bound"
pub const INVALID_CONTROL_ID: ControlId = u16::MAX;

/// Events produced by the control monitors
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Buttons
    /// Button settled in the pressed state
    ///
    /// `presses` counts successive presses inside the double-click window,
    /// starting at 1.
    ButtonPressed { id: ControlId, presses: u8 },
    /// Button settled in the released state
    ButtonReleased { id: ControlId },

    // Encoders
    /// Encoder moved by `increments` detents since the last report
    EncoderTurned {
        id: ControlId,
        increments: i16,
        steps_per_rev: u16,
    },
    /// Encoder started or stopped turning
    EncoderActivityChanged { id: ControlId, active: bool },

    // Pots
    /// Pot moved to `position` (0.0 ..= 1.0)
    PotMoved { id: ControlId, position: f32 },
    /// Pot started or stopped moving
    PotActivityChanged { id: ControlId, active: bool },
}

impl Event {
    /// Id of the control that produced this event
    pub fn control_id(&self) -> ControlId {
        match *self {
            Event::ButtonPressed { id, .. }
            | Event::ButtonReleased { id }
            | Event::EncoderTurned { id, .. }
            | Event::EncoderActivityChanged { id, .. }
            | Event::PotMoved { id, .. }
            | Event::PotActivityChanged { id, .. } => id,
        }
    }

    /// Check if this event comes from a button
    pub fn is_button(&self) -> bool {
        matches!(
            self,
            Event::ButtonPressed { .. } | Event::ButtonReleased { .. }
        )
    }

    /// Check if this event comes from an encoder
    pub fn is_encoder(&self) -> bool {
        matches!(
            self,
            Event::EncoderTurned { .. } | Event::EncoderActivityChanged { .. }
        )
    }

    /// Check if this event comes from a pot
    pub fn is_pot(&self) -> bool {
        matches!(
            self,
            Event::PotMoved { .. } | Event::PotActivityChanged { .. }
        )
    }
}
