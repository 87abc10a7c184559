//! Interactive routing loop.

use std::io::Write;
use wayfinder_core::RouterResponse;

use super::build_router;

/// Strategy for routing queries read line by line from stdin.
#[derive(Debug, Clone, Copy)]
pub struct ChatStrategy;

impl super::CommandStrategy for ChatStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let router = build_router()?;
        println!("wayfinder started. Describe what you need, or type 'exit' to quit.\n");

        loop {
            print!("> ");
            std::io::stdout().flush()?;

            let mut input = String::new();
            if std::io::stdin().read_line(&mut input)? == 0 {
                break;
            }
            let input = input.trim();

            if input == "exit" {
                break;
            }

            if input.is_empty() {
                continue;
            }

            match router.route(input).await {
                Ok(response) => println!("\n{}\n", describe(&response)),
                Err(e) => eprintln!("Error: {e}"),
            }
        }

        router.finish_pending_saves().await;
        Ok(())
    }
}

fn describe(response: &RouterResponse) -> String {
    let mut lines = Vec::new();
    if let Some(message) = &response.message {
        lines.push(message.clone());
    }
    if let (Some(name), Some(route)) = (&response.internal.matched, &response.internal.route) {
        lines.push(format!("Go to {name}: {route}"));
        if response.ask_form == Some(true) {
            lines.push("Want us to contact you? Share your name and email.".to_string());
        }
    }
    if !response.external.is_empty() {
        lines.push("See also:".to_string());
        lines.extend(response.external.iter().map(|link| format!("  {link}")));
    }
    if lines.is_empty() {
        lines.push("Nothing found.".to_string());
    }
    lines.join("\n")
}
