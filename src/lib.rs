//! Interactive invoice register.
//!
//! The column model ([`columns`]) and line formatter ([`line_fmt`]) render
//! aligned text tables; [`billing`] holds the invoice being built and
//! renders it with them; [`run`] is the command loop that drives it over a
//! line oriented [`input::Console`].

pub mod billing;
pub mod cli;
pub mod columns;
pub mod error;
pub mod input;
pub mod line_fmt;
pub mod run;
