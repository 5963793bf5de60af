//! Walks a rehearsal run sheet through a handful of availability requests.

use runthrough::constraints::{Severity, Submission};
use runthrough::planner::Planner;

fn print_schedule(planner: &Planner) {
    let outcome = planner.compute_schedule();
    let catalog = planner.catalog();

    println!("Run Sheet:");
    println!("==========");
    for (song, placement) in outcome.placements(catalog) {
        println!("{:<20} {}", song.label(), placement);
    }
    match outcome.score {
        Some(score) => println!("Conflict score: {}", score),
        None => println!("Conflict score: n/a"),
    }
    println!();
    print!("{}", outcome.report);
    println!();
}

fn main() {
    let planner = Planner::default();
    print_schedule(&planner);

    let requests = [
        Submission::new("Rang Jo Lagyo", "Priya")
            .forbid("6–7 PM")
            .with_reason("Stuck at work")
            .with_severity(Severity::Medium),
        Submission::new("Take On Me", "Marco")
            .forbid_all(["6–7 PM", "7–8 PM"])
            .with_severity(Severity::Low),
        Submission::new("Bring Me to Life", "Dana")
            .forbid_all(["6–7 PM", "7–8 PM", "8–9 PM", "9–10 PM", "10–11 PM", "11–12 PM"])
            .with_reason("Only free after midnight")
            .with_severity(Severity::High),
        // Rejected: the slot is not on the sheet.
        Submission::new("Garaj Garaj", "Ravi").forbid("5–6 PM"),
    ];

    for request in requests {
        let song = request.item().to_string();
        match planner.submit_constraint(request) {
            Ok(id) => println!("Accepted request {} for {}", id, song),
            Err(e) => println!("Rejected request for {}: {}", song, e),
        }
    }
    println!();

    print_schedule(&planner);

    println!("Requests on file:");
    for song in planner.catalog().items() {
        if let Ok(records) = planner.constraints_for(song.label()) {
            for record in records {
                println!("  {}: {}", song.label(), record.display(planner.catalog()));
            }
        }
    }

    let selectable: Vec<&str> = planner
        .selectable_slots()
        .iter()
        .map(|s| s.label())
        .collect();
    println!();
    println!("Selectable slots: {}", selectable.join(", "));
}
