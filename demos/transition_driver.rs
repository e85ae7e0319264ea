//! Transition Driver
//!
//! This example plays the part of a render loop that owns transition
//! completion.
//!
//! Key concepts:
//! - `navigate` returns immediately with a pending handle
//! - Listeners run synchronously, after the location is refreshed
//! - The driver ends a transition by calling `on_transition_complete`
//! - Navigating mid-transition replaces the entry and orphans the old handle
//!
//! Run with: cargo run --example transition_driver

use navstack::core::MemorySource;
use navstack::history::{History, NavigateOptions, TransitionStatus};
use serde_json::json;
use std::rc::Rc;

/// Stand-in for an animation loop: finishes whatever is in flight.
struct RenderLoop {
    history: History,
    frames: usize,
}

impl RenderLoop {
    fn frame(&mut self) {
        self.frames += 1;
        if self.history.transitioning() {
            println!(
                "  frame {}: finishing transition to {}",
                self.frames,
                self.history.location()
            );
            self.history.on_transition_complete();
        } else {
            println!("  frame {}: idle", self.frames);
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    println!("=== Transition Driver Example ===\n");

    let source = Rc::new(MemorySource::new("/"));
    let history = History::new(source.clone());

    let observer = history.clone();
    let unlisten = history.listen(move || {
        println!(
            "  listener: now at {} (transitioning: {})",
            observer.location(),
            observer.transitioning()
        );
    });

    let mut driver = RenderLoop {
        history: history.clone(),
        frames: 0,
    };

    // Step 1: a plain navigation
    println!("Step 1: Navigate to /about");
    let about = history.navigate("/about", NavigateOptions::new().state(json!({ "from": "/" })));
    driver.frame();
    about.await;
    println!("  ✓ transition resolved, stack depth {}\n", source.len());

    // Step 2: replace the current entry
    println!("Step 2: Replace with /contact");
    let contact = history.navigate("/contact", NavigateOptions::new().replace(true));
    driver.frame();
    assert!(contact.is_complete());
    println!("  ✓ index still {}\n", source.index());

    // Step 3: two navigations before the driver runs
    println!("Step 3: Navigate twice within one frame");
    let first = history.navigate("/a", NavigateOptions::new());
    let second = history.navigate("/b", NavigateOptions::new());
    driver.frame();
    assert_eq!(first.status(), TransitionStatus::Orphaned);
    assert!(second.is_complete());
    println!("  ✓ first handle orphaned, second resolved");
    println!("  ✓ entries: {:?}\n", source.entries());

    driver.frame();
    unlisten.unlisten();

    println!("=== Example Complete ===");
}
