use csv::ReaderBuilder;
use paxpack::avec::{Key, Record};

const PATH: &str = "fixtures/uplinks.csv";

#[test]
fn decode_slice_fixtures() {
    for uplink in fixtures() {
        let record = paxpack::avec::decode_slice(&uplink.payload, uplink.port).unwrap();
        uplink.validate(&record);
    }
}

#[cfg(feature = "std")]
#[test]
fn decode_reader_fixtures() {
    for uplink in fixtures() {
        let mut cursor = std::io::Cursor::new(&uplink.payload);
        let record = paxpack::avec::decode_reader(&mut cursor, uplink.port).unwrap();
        uplink.validate(&record);
    }
}

#[cfg(feature = "std")]
#[test]
fn decode_reader_rejects_more_than_an_uplink() {
    use paxpack::avec::reader::{Error, MAX_PAYLOAD};

    let mut longest = std::io::Cursor::new(vec![0; MAX_PAYLOAD]);
    let record = paxpack::avec::decode_reader(&mut longest, 2).unwrap();
    assert_eq!(record.len(), 6);

    let mut longer = std::io::Cursor::new(vec![0; 250]);
    assert!(matches!(
        paxpack::avec::decode_reader(&mut longer, 1),
        Err(Error::TooLong)
    ));
}

#[test]
fn fixtures_cover_every_port() {
    let mut ports: Vec<u8> = fixtures().iter().map(|u| u.port).collect();
    ports.dedup();
    assert_eq!(ports, (1..=8).collect::<Vec<_>>());
}

struct Uplink {
    line: usize,
    port: u8,
    payload: Vec<u8>,
    expected: Vec<(String, String)>,
}

impl Uplink {
    fn validate(&self, record: &Record) {
        let found: Vec<(String, String)> = record
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        assert_eq!(found, self.expected, "uplink on line {}", self.line);

        for (name, _) in &self.expected {
            assert!(
                matches!(record.keys().find(|k| k.to_string() == *name), Some(Key::Name(_))),
                "uplink on line {}: {name} is not a named key",
                self.line
            );
        }
    }
}

fn fixtures() -> Vec<Uplink> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_path(PATH)
        .unwrap();

    reader
        .records()
        .enumerate()
        .map(|(i, r)| {
            let r = r.unwrap();
            let mut fields = r.iter();

            let port = fields.next().unwrap().parse().unwrap();
            let payload = hex::decode(fields.next().unwrap()).unwrap();

            let rest: Vec<String> = fields.map(|f| f.to_string()).collect();
            let expected = rest
                .chunks(2)
                .map(|kv| (kv[0].clone(), kv[1].clone()))
                .collect();

            Uplink {
                line: i + 1,
                port,
                payload,
                expected,
            }
        })
        .collect()
}
