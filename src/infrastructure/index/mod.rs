pub mod flat_l2;
