pub mod synthetic_events;
