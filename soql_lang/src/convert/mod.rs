pub mod to_logic;
