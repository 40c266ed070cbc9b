//! Wire types shared by the CloudWaste server, dashboard client and fleet
//! simulator.

pub mod models;
