use rbencode::{Error, Metainfo, TrackerClient};
use url::form_urlencoded;

const PEER_ID: [u8; 20] = *b"-PC0001-123456789012";

fn metainfo(announce: &str) -> Metainfo {
    let data = [
        format!("d8:announce{}:{}4:info", announce.len(), announce).into_bytes(),
        b"d6:lengthi1000e4:name1:a12:piece lengthi512e6:pieces40:".to_vec(),
        vec![0x20; 40],
        b"ee".to_vec(),
    ]
    .concat();

    Metainfo::from_bencode(&data).unwrap()
}

fn encoded_hash(metainfo: &Metainfo) -> String {
    form_urlencoded::byte_serialize(metainfo.info_hash()).collect()
}

#[test]
fn first_announce_url() {
    let metainfo = metainfo("http://tracker.example.com/announce");
    let client = TrackerClient::new(&metainfo, PEER_ID, 6889);

    assert_eq!(
        client.announce_url(true, 0, 100),
        Ok(format!(
            "http://tracker.example.com/announce?info_hash={}&peer_id=-PC0001-123456789012\
             &port=6889&uploaded=0&downloaded=100&left=900&compact=1&event=started",
            encoded_hash(&metainfo)
        ))
    );
}

#[test]
fn regular_announce_url_without_event() {
    let metainfo = metainfo("http://tracker.example.com/announce");
    let client = TrackerClient::new(&metainfo, PEER_ID, 6881);

    assert_eq!(
        client.announce_url(false, 10, 2000),
        Ok(format!(
            "http://tracker.example.com/announce?info_hash={}&peer_id=-PC0001-123456789012\
             &port=6881&uploaded=10&downloaded=2000&left=0&compact=1",
            encoded_hash(&metainfo)
        ))
    );
}

#[test]
fn announce_url_keeps_existing_query() {
    let metainfo = metainfo("https://tracker.example.com/announce?passkey=abc");
    let client = TrackerClient::new(&metainfo, PEER_ID, 6889);

    let url = client.announce_url(false, 0, 0).unwrap();
    assert!(url.starts_with(&format!(
        "https://tracker.example.com/announce?passkey=abc&info_hash={}&",
        encoded_hash(&metainfo)
    )));
}

#[test]
fn announce_url_unsupported_scheme() {
    let client = TrackerClient::new(&metainfo("udp://tracker.example.com:80"), PEER_ID, 6889);

    assert_eq!(
        client.announce_url(true, 0, 0),
        Err(Error::TrackerUrl("udp://tracker.example.com:80".into()))
    );
}

#[test]
fn announce_url_invalid() {
    let client = TrackerClient::new(&metainfo("not a url"), PEER_ID, 6889);

    assert!(matches!(
        client.announce_url(true, 0, 0),
        Err(Error::TrackerUrl(_))
    ));
}
