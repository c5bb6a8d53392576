pub mod use_tickets;
