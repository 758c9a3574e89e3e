use address_validator::utils::logger;
use address_validator::{WireResponse, WireStatus};
use anyhow::{Context, Result};
use clap::Parser;
use zeromq::{ReqSocket, Socket, SocketRecv, SocketSend, ZmqMessage};

const SAMPLE_ADDRESSES: [&str; 3] = [
    "123 SE Main St, Corvallis, OR 97333",
    "999 Fake Street, Sunderland, OR 97330",
    "450 SW 3rd St, Corvallis, OR 97333",
];

#[derive(Debug, Parser)]
#[command(name = "address_client")]
#[command(about = "Sends addresses to the address validator one at a time")]
struct ClientArgs {
    #[arg(long, default_value = "tcp://localhost:5555")]
    connect: String,

    #[arg(help = "Addresses to validate; a built-in sample set is used when omitted")]
    addresses: Vec<String>,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = ClientArgs::parse();
    logger::init_cli_logger(args.verbose);

    let addresses: Vec<String> = if args.addresses.is_empty() {
        SAMPLE_ADDRESSES.iter().map(|a| a.to_string()).collect()
    } else {
        args.addresses.clone()
    };

    let mut socket = ReqSocket::new();
    socket
        .connect(&args.connect)
        .await
        .with_context(|| format!("failed to connect to {}", args.connect))?;

    for address in &addresses {
        let request = serde_json::json!({ "address": address }).to_string();
        socket.send(ZmqMessage::from(request)).await?;
        println!("\n[Client] Sent address: {}", address);

        let reply = socket.recv().await?;
        let body: Vec<u8> = reply
            .into_vec()
            .into_iter()
            .flat_map(|frame| frame.to_vec())
            .collect();

        match serde_json::from_slice::<WireResponse>(&body) {
            Ok(WireResponse::Outcome {
                status: WireStatus::Valid,
                corrected_address,
            }) => println!("[Client] VALID - Standardized: {}", corrected_address),
            Ok(WireResponse::Outcome { .. }) => println!("[Client] INVALID - Could not validate"),
            Ok(WireResponse::Error { error }) => println!("[Client] ERROR - {}", error),
            Err(e) => {
                tracing::warn!("Undecodable reply: {}", e);
                println!("[Client] Invalid JSON response");
            }
        }
    }

    Ok(())
}
