pub mod mqtt {
    pub mod broker;
    pub mod client;
}
