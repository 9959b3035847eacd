pub mod affordability;
pub mod commission;
pub mod investment;
pub mod payment;
pub mod seller_net;
