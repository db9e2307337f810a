pub mod cell;
pub mod load;
pub mod record;
pub mod table;
