//! Dataset text format.
//!
//! ```text
//! #Data
//! alternative id,MaxSpeed[g],FuelCons[c]
//! b01,90,3
//! b02,70,2
//! #Preferences
//! b01,b02,preference
//! b01,b02,b02,b01,weak preference
//! #Parameters
//! eps=0.001
//! alpha_values=[0.0, 0.5, 1.0]
//! ```
//!
//! Columns are separated by `,` or `;`, detected from the header. Criteria are
//! marked `[g]` (gain) or `[c]` (cost). Preference lines hold two
//! alternatives and a relation, intensity lines four alternatives and a
//! relation. Parameter keys are case-insensitive.

mod reader;
mod writer;

pub use reader::{parse_dataset, read_dataset, LoadedDataset};
pub use writer::{format_dataset, write_dataset};

pub const DATA_SECTION: &str = "#Data";
pub const PREFERENCES_SECTION: &str = "#Preferences";
pub const PARAMETERS_SECTION: &str = "#Parameters";

/// Accepted column separators, in detection order.
pub const SEPARATORS: [char; 2] = [',', ';'];

/// Header label of the alternative column written by [`format_dataset`].
pub const ALTERNATIVE_COLUMN: &str = "alternative id";
