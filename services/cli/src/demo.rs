use support_triage::error::AppError;
use support_triage::workflows::triage::{TicketResult, TriagePipeline};

use crate::output::{render_text, summaries_json, OutputFormat};

pub(crate) struct SampleTicket {
    pub(crate) name: &'static str,
    pub(crate) content: &'static str,
}

pub(crate) const SAMPLE_TICKETS: [SampleTicket; 4] = [
    SampleTicket {
        name: "Technical issue, urgent",
        content: "URGENT: Our production system is completely down! We're losing money every \
                  minute. This is a critical emergency and we need immediate help. Our entire \
                  team cannot work!",
    },
    SampleTicket {
        name: "Billing inquiry",
        content: "Hello, I noticed an unexpected charge on my invoice for this month. Can you \
                  please help me understand what this charge is for? I'd appreciate a detailed \
                  breakdown.",
    },
    SampleTicket {
        name: "Feature request",
        content: "Hi team, I really love your product! I was wondering if you could add a dark \
                  mode feature. It would be great for working late at night. Thanks for \
                  considering!",
    },
    SampleTicket {
        name: "Account issue",
        content: "I'm very frustrated. I've been trying to reset my password for 3 days now and \
                  nothing works. I can't access my account and I have important work to do. This \
                  is unacceptable.",
    },
];

pub(crate) fn run_demo(pipeline: &TriagePipeline, format: OutputFormat) -> Result<(), AppError> {
    let contents: Vec<&str> = SAMPLE_TICKETS.iter().map(|sample| sample.content).collect();
    let results = pipeline.process_batch(&contents)?;

    match format {
        OutputFormat::Json => println!("{}", summaries_json(&results)?),
        OutputFormat::Text => print_demo(&results),
    }
    Ok(())
}

fn print_demo(results: &[TicketResult]) {
    println!("Support triage demo");
    println!(
        "Processing {} sample tickets through classification, routing, response drafting, and escalation",
        results.len()
    );

    for (index, (sample, result)) in SAMPLE_TICKETS.iter().zip(results).enumerate() {
        println!(
            "\nSample ticket {}/{}: {}",
            index + 1,
            SAMPLE_TICKETS.len(),
            sample.name
        );
        println!("{}", render_text(result));
    }

    let escalated = results
        .iter()
        .filter(|result| result.escalation().escalation_needed)
        .count();
    println!(
        "\nDemo complete: {} tickets processed, {} escalated",
        results.len(),
        escalated
    );
}
