// Application views reachable from the root route table

pub mod users;
