//! Interactive terminal chat client for the Smart Doctor Assistant API

use clap::Parser;
use docassist_client::auth::{AuthForm, AuthMode, Role, SubmitOutcome};
use docassist_client::chat::{Conversation, Message, MessageRole};
use docassist_client::config::ClientOptions;
use docassist_client::DocAssist;
use dotenv::dotenv;
use log::info;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "docassist", version, about = "Chat with the Smart Doctor Assistant", long_about = None)]
struct Args {
    /// Base URL of the assistant backend
    #[arg(long, env = "DOCASSIST_URL", default_value = "http://localhost:8000")]
    url: String,

    /// Override the session file location
    #[arg(long, env = "DOCASSIST_SESSION_FILE")]
    session_file: Option<PathBuf>,

    /// Request timeout in seconds; omit to wait indefinitely
    #[arg(long, env = "DOCASSIST_TIMEOUT")]
    timeout: Option<u64>,

    /// Number of history rows to fetch at startup
    #[arg(long, env = "DOCASSIST_HISTORY_LIMIT")]
    history_limit: Option<usize>,
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn render(message: &Message) {
    match message.role {
        MessageRole::Human => println!("you> {}", message.content),
        MessageRole::Ai => println!("assistant> {}", message.content),
        MessageRole::System => println!("* {}", message.content),
    }
}

fn render_transcript(conversation: &Conversation) {
    for message in conversation.messages() {
        render(message);
    }
}

/// Render whatever the last operation appended or replaced, skipping the
/// user's own line (already on screen from the prompt)
fn render_outcome(conversation: &Conversation, before: Option<&Message>) {
    let last = match conversation.messages().last() {
        Some(last) => last,
        None => return,
    };
    if Some(last) != before && last.role != MessageRole::Human {
        render(last);
    }
}

/// Drive the auth form until a session exists; false means the user quit
async fn run_auth(form: &mut AuthForm, client: &DocAssist) -> io::Result<bool> {
    loop {
        if let Some(notice) = form.notice.take() {
            println!("* {}", notice);
        }

        let mode = match form.mode {
            AuthMode::Login => "login",
            AuthMode::Register => "register",
        };
        println!("[{}] enter credentials ('switch' to toggle, 'quit' to exit)", mode);

        let email = prompt("email: ")?;
        match email.as_str() {
            "switch" => {
                form.toggle_mode();
                continue;
            }
            "quit" => return Ok(false),
            _ => {}
        }
        form.email = email;
        form.password = prompt("password: ")?;

        if form.mode == AuthMode::Register {
            let role = prompt("role [patient/doctor]: ")?;
            if role.eq_ignore_ascii_case("doctor") {
                form.role = Some(Role::Doctor);
                form.doctor_name = prompt("full name: ")?;
                form.doctor_specialty = prompt("specialty: ")?;
            } else {
                form.role = Some(Role::Patient);
            }
        }

        match form.submit(client.auth()).await {
            SubmitOutcome::LoggedIn => return Ok(true),
            SubmitOutcome::Registered | SubmitOutcome::Ignored => {}
            SubmitOutcome::Rejected => {
                if let Some(ref error) = form.error {
                    println!("! {}", error);
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut options = ClientOptions::default();
    if let Some(secs) = args.timeout {
        options = options.with_request_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(path) = args.session_file {
        options = options.with_session_file(path);
    }
    if let Some(limit) = args.history_limit {
        options = options.with_history_limit(limit);
    }

    let client = DocAssist::new_with_options(&args.url, options);
    info!("Backend URL: {}", client.url);

    let mut conversation = client.conversation();
    if client.auth().restore_session().is_some() {
        conversation.bootstrap().await;
    }

    let mut form = AuthForm::new();
    loop {
        if !conversation.is_logged_in() {
            render_transcript(&conversation);
            if !run_auth(&mut form, &client).await? {
                break;
            }
            conversation.bootstrap().await;
            if let Some(profile) = conversation.profile() {
                info!("logged in as {} ({})", profile.email, profile.role);
                render_transcript(&conversation);
            }
            continue;
        }

        let line = prompt("you> ")?;
        let before = conversation.messages().last().cloned();
        match line.as_str() {
            "" => {}
            "/quit" => break,
            "/logout" => {
                conversation.logout();
                render_transcript(&conversation);
            }
            "/report" => {
                conversation.request_daily_report().await;
                render_outcome(&conversation, before.as_ref());
            }
            text => {
                conversation.set_draft(text);
                conversation.send_draft().await;
                render_outcome(&conversation, before.as_ref());
            }
        }
    }

    Ok(())
}
