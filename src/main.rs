use rbencode::constant::{MAX_NESTING_DEPTH, PORT};
use rbencode::{peer_id, utils, BDecoder, Error, Metainfo, TrackerClient};
use std::fs;
use std::path::PathBuf;
use structopt::StructOpt;
use tracing::Level;

#[derive(StructOpt, Debug)]
#[structopt(name = "rbencode", about = "Bencode decoder and BitTorrent tracker client")]
struct Opt {
    /// Enable debug logs
    #[structopt(short, long)]
    verbose: bool,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(StructOpt, Debug)]
enum Command {
    /// Decode all values from bencoded file
    Decode {
        #[structopt(parse(from_os_str))]
        path: PathBuf,
        /// Maximal nesting of lists and dictionaries [default: library limit]
        #[structopt(long)]
        max_depth: Option<usize>,
    },
    /// Show torrent file summary
    Info {
        #[structopt(parse(from_os_str))]
        path: PathBuf,
    },
    /// Send announce request to torrent's tracker
    Announce {
        #[structopt(parse(from_os_str))]
        path: PathBuf,
        /// Port announced to tracker
        #[structopt(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let opt = Opt::from_args();

    tracing_subscriber::fmt()
        .with_max_level(match opt.verbose {
            true => Level::DEBUG,
            false => Level::INFO,
        })
        .init();

    match opt.cmd {
        Command::Decode { path, max_depth } => {
            decode(path, max_depth.unwrap_or(MAX_NESTING_DEPTH))
        }
        Command::Info { path } => info(path),
        Command::Announce { path, port } => announce(path, port.unwrap_or(PORT)).await,
    }
}

fn decode(path: PathBuf, max_depth: usize) -> Result<(), Error> {
    if max_depth > MAX_NESTING_DEPTH {
        tracing::warn!(max_depth, "nesting limit above default");
    }

    let mut decoder = BDecoder::new(fs::read(path)?).with_max_depth(max_depth);
    loop {
        let start = decoder.position();
        let value = decoder.decode()?;
        println!("[{}..{}] {}", start, decoder.position(), value);

        if decoder.is_exhausted() {
            return Ok(());
        }
    }
}

fn info(path: PathBuf) -> Result<(), Error> {
    let metainfo = Metainfo::from_file(&path)?;

    println!("name: {}", metainfo.name());
    println!("announce: {}", metainfo.tracker_url());
    println!("info hash: {}", utils::hash_to_string(metainfo.info_hash()));
    println!("piece length: {}", metainfo.piece_length());
    println!("pieces: {}", metainfo.pieces_num());
    for file in metainfo.files() {
        println!("file: {} ({} bytes)", file.path, file.length);
    }
    println!("total length: {}", metainfo.total_length());

    Ok(())
}

async fn announce(path: PathBuf, port: u16) -> Result<(), Error> {
    let metainfo = Metainfo::from_file(&path)?;
    let own_id = peer_id::generate();
    tracing::debug!(peer_id = %String::from_utf8_lossy(&own_id), "peer ID generated");

    let client = TrackerClient::new(&metainfo, own_id, port);
    let resp = client.connect(true, 0, 0).await?;
    print!("{}", resp);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max_depth(args: &[&str]) -> Option<usize> {
        match Opt::from_iter(args).cmd {
            Command::Decode { max_depth, .. } => max_depth,
            cmd => panic!("unexpected command {:?}", cmd),
        }
    }

    #[test]
    fn decode_max_depth_defaults_to_library_limit() {
        assert_eq!(max_depth(&["rbencode", "decode", "a.torrent"]), None);
    }

    #[test]
    fn decode_max_depth_override() {
        assert_eq!(
            max_depth(&["rbencode", "decode", "--max-depth", "3", "a.torrent"]),
            Some(3)
        );
    }
}
