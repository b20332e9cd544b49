use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use sigverify::Result;
use sigverify_client::{
    sign_message, tamper_signature, JsonRpcSigner, VerifyClient,
};
use sigverify_core::{canonical_payload, hash_message, VerifyRequest};

/// Sign personal messages and verify signatures.
#[derive(Parser, Debug)]
#[clap(name = "sigverify", author, version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign a message with an external signer.
    Sign {
        /// JSON-RPC endpoint of the signer.
        #[clap(short, long, env = "SIGVERIFY_RPC")]
        rpc: Url,

        /// Message to sign.
        message: String,
    },
    /// Verify a signed message using a server.
    Verify {
        /// Server URL.
        #[clap(short, long, default_value = "http://127.0.0.1:9060")]
        server: Url,

        /// Message that was signed.
        #[clap(short, long)]
        message: String,

        /// Hex-encoded signature.
        #[clap(short = 'g', long)]
        signature: String,

        /// Address of the claimed signer.
        #[clap(short, long)]
        address: String,

        /// Overwrite the end of the signature before verifying.
        #[clap(long)]
        tamper: bool,
    },
    /// Print the digest that is signed for a message.
    Hash {
        /// Message to hash.
        message: String,
    },
    /// Start a server.
    Server {
        /// Bind to host:port.
        #[clap(short, long, default_value = "127.0.0.1:9060")]
        bind: String,

        /// Config file to load.
        #[clap(short, long, parse(from_os_str))]
        config: Option<PathBuf>,
    },
}

async fn run() -> Result<()> {
    let args = Cli::parse();

    match args.command {
        Command::Sign { rpc, message } => {
            let signer = JsonRpcSigner::new(rpc);
            let doc = sign_message(&signer, &message).await?;
            serde_json::to_writer_pretty(std::io::stdout(), &doc)?;
        }
        Command::Verify {
            server,
            message,
            signature,
            address,
            tamper,
        } => {
            let signature = if tamper {
                tamper_signature(&signature)
            } else {
                signature
            };
            let request = VerifyRequest::new(message, signature, address);
            let doc = VerifyClient::verify(server, &request).await?;
            serde_json::to_writer_pretty(std::io::stdout(), &doc)?;
        }
        Command::Hash { message } => {
            let digest = hash_message(canonical_payload(&message));
            println!("0x{}", hex::encode(digest));
        }
        Command::Server { bind, config } => {
            sigverify_server::start(bind, config).await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(_) => {}
        Err(e) => {
            tracing::error!("{}", e);
        }
    }
    Ok(())
}
