pub mod inter_reverse_two_opt;
pub mod r#move;
