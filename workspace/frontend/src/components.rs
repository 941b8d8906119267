pub mod cards;
pub mod chart;
pub mod filter_panel;
pub mod forms;
pub mod guard;
pub mod layout;
pub mod table;
