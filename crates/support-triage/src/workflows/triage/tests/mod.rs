mod common;

mod escalation;
mod pipeline;
