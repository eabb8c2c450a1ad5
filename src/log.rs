/// Targets to filter logs by.
pub mod targets {
    pub const CLAUSIFY: &str = "clausify";
    pub const TABLEAU: &str = "tableau";
    pub const ORACLE: &str = "oracle";
}
