// Adapters layer: concrete readers for the external formats cabinet specs arrive in.

pub mod csv_input;
