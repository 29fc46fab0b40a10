pub mod ols;
