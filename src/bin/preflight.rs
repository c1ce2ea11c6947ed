use grade_dashboard::domain::session::{FileTokenStore, TokenStore};
use grade_dashboard::infra::{config, logging};
use grade_dashboard::transport::http::types::ApiResponse;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--skip-remote]\n\
         \n\
         Reads env vars (all optional):\n\
           DASHBOARD_BIND_ADDR, PORT, STATIC_DIR, SESSION_TOKEN_FILE,\n\
           AUTH_REMOTE_URL, SEED_SAMPLE_DATA, MAX_SESSIONS\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let skip_remote = args.iter().any(|a| a == "--skip-remote");

    // Force-read config (nice error messages if malformed)
    let addr = config::socket_addr()?;
    let seed = config::seed_sample_data()?;
    let max_sessions = config::max_sessions()?;
    let static_dir = config::static_dir();
    let token_file = config::session_token_file();

    println!("> Preflight:");
    println!("  Listen address: {}", addr);
    println!("  SEED_SAMPLE_DATA={}", seed);
    println!("  MAX_SESSIONS={}", max_sessions);
    println!("  STATIC_DIR={}", static_dir.display());
    println!("  SESSION_TOKEN_FILE={}", token_file.display());

    // Front-end bundle
    let index = static_dir.join("index.html");
    if !index.is_file() {
        return Err(anyhow::anyhow!(
            "{} is missing; build the front-end or point STATIC_DIR at it",
            index.display()
        ));
    }
    println!("  Front-end entry point found: {}", index.display());

    // Persisted session
    let store = FileTokenStore::new(&token_file);
    if store.load().is_some() {
        println!("  A session token is persisted; clients will restore as authenticated.");
    } else {
        println!("  No persisted session token; clients start anonymous.");
    }

    // Delegated authentication
    match config::auth_remote_url() {
        None => println!("  AUTH_REMOTE_URL not set; clients use the built-in account allowlist."),
        Some(_) if skip_remote => println!("  AUTH_REMOTE_URL set; reachability check skipped."),
        Some(url) => {
            let health_url = format!("{}/health", url.trim_end_matches('/'));
            let resp = reqwest::get(&health_url)
                .await
                .map_err(|e| anyhow::anyhow!("Auth server unreachable at {}: {}", health_url, e))?;
            let status = resp.status();
            let body: ApiResponse = resp.json().await.map_err(|e| {
                anyhow::anyhow!("Auth server at {} did not answer with an API envelope: {}", url, e)
            })?;
            if !status.is_success() || !body.success {
                return Err(anyhow::anyhow!(
                    "Auth server at {} reports unhealthy (HTTP {}): {:?}",
                    url,
                    status,
                    body.error
                ));
            }
            println!("  Auth server healthy at {} ({:?})", url, body.data);
        }
    }

    println!("> Preflight OK.");
    Ok(())
}
