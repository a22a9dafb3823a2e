use paxpack::{
    avec::Value,
    sans::field::{Field, LengthMismatch},
};

fn f64_of(field: Field, r: &[u8]) -> f64 {
    field.decode(r).unwrap().as_f64().unwrap()
}

#[test]
fn uint16_is_little_endian() {
    assert_eq!(Field::Uint16.decode(&[0x01, 0x00]), Ok(Value::U16(1)));
    assert_eq!(Field::Uint16.decode(&[0x00, 0x01]), Ok(Value::U16(256)));
}

#[test]
fn uint32_keeps_the_top_bit() {
    assert_eq!(
        Field::Uint32.decode(&[0xFF, 0xFF, 0xFF, 0xFF]),
        Ok(Value::U32(u32::MAX))
    );
}

#[test]
fn uptime_is_not_truncated_to_32_bits() {
    let r = 0x0102_0304_0506_0708u64.to_le_bytes();
    assert_eq!(
        Field::Uptime.decode(&r),
        Ok(Value::U64(0x0102_0304_0506_0708))
    );
}

#[test]
fn lat_lng_is_millionths_of_a_degree() {
    assert_eq!(f64_of(Field::LatLng, &[0x40, 0x42, 0x0F, 0x00]), 1.0);
    assert_eq!(
        f64_of(Field::LatLng, &48_137_154u32.to_le_bytes()),
        48.137154
    );
}

#[test]
fn hdop_is_hundredths() {
    assert_eq!(f64_of(Field::Hdop, &[0x64, 0x00]), 1.0);
    assert_eq!(f64_of(Field::Hdop, &[0x7B, 0x00]), 1.23);
}

#[test]
fn ufloat_rounds_to_one_decimal() {
    assert_eq!(f64_of(Field::UFloat, &4567u16.to_le_bytes()), 45.7);
    assert_eq!(f64_of(Field::UFloat, &4564u16.to_le_bytes()), 45.6);
    assert_eq!(f64_of(Field::UFloat, &[0xFF, 0xFF]), 655.4);
}

#[test]
fn rounding_follows_the_binary_quotient() {
    // 0.15 and 0.35 are stored just below their decimal values, 0.25 exactly.
    assert_eq!(f64_of(Field::UFloat, &15u16.to_le_bytes()), 0.1);
    assert_eq!(f64_of(Field::UFloat, &35u16.to_le_bytes()), 0.3);
    assert_eq!(f64_of(Field::UFloat, &25u16.to_le_bytes()), 0.3);
    assert_eq!(f64_of(Field::UFloat, &85u16.to_le_bytes()), 0.8);
    assert_eq!(f64_of(Field::UFloat, &12345u16.to_le_bytes()), 123.5);
    assert_eq!(f64_of(Field::Pressure, &25u16.to_le_bytes()), 2.5);

    assert_eq!(f64_of(Field::Float, &2345i16.to_be_bytes()), 23.4);
    assert_eq!(f64_of(Field::Float, &(-1235i16).to_be_bytes()), -12.3);
    assert_eq!(f64_of(Field::Float, &(-25i16).to_be_bytes()), -0.3);
}

#[test]
fn rounding_to_zero_is_unsigned() {
    let value = Field::Float.decode(&(-4i16).to_be_bytes()).unwrap();
    assert_eq!(value.to_string(), "0");
}

#[test]
fn pressure_is_tenths() {
    assert_eq!(f64_of(Field::Pressure, &10131u16.to_le_bytes()), 1013.1);
    assert_eq!(f64_of(Field::Pressure, &[0x00, 0x00]), 0.0);
}

#[test]
fn float_is_big_endian_twos_complement() {
    assert_eq!(f64_of(Field::Float, &[0x00, 0x00]), 0.0);
    assert_eq!(f64_of(Field::Float, &[0xFF, 0x9C]), -1.0);
    assert_eq!(f64_of(Field::Float, &[0x00, 0x64]), 1.0);
    assert_eq!(f64_of(Field::Float, &2355i16.to_be_bytes()), 23.6);
    assert_eq!(f64_of(Field::Float, &(-1234i16).to_be_bytes()), -12.3);
    assert_eq!(f64_of(Field::Float, &[0x80, 0x00]), -327.7);
    assert_eq!(f64_of(Field::Float, &[0x7F, 0xFF]), 327.7);
}

#[test]
fn version_stops_at_nul() {
    let r = *b"1.0\0\0\0\0\0\0\0";
    let value = Field::Version.decode(&r).unwrap();
    let version = value.as_version().unwrap();

    assert_eq!(*version, "1.0");
    assert_eq!(version.as_bytes(), b"1.0");
    assert_eq!(value.to_string(), "1.0");
}

#[test]
fn version_fills_field_without_nul() {
    let r = *b"2.10.3-rc1";
    let value = Field::Version.decode(&r).unwrap();
    assert_eq!(value.as_version().unwrap().as_str(), Some("2.10.3-rc1"));
}

#[test]
fn version_ignores_bytes_after_nul() {
    let r = *b"1.2\0garbag";
    let value = Field::Version.decode(&r).unwrap();
    assert_eq!(value.as_version().unwrap().as_str(), Some("1.2"));
}

#[test]
fn config_flags_are_most_significant_bit_first() {
    let value = Field::ConfigFlags.decode(&[0b1000_0000]).unwrap();
    let flags = value.as_config_flags().unwrap();

    let bits: Vec<_> = flags.iter().collect();
    assert_eq!(
        bits,
        vec![
            ("adr", true),
            ("screensaver", false),
            ("screen", false),
            ("countermode", false),
            ("blescan", false),
            ("antenna", false),
            ("filter", false),
            ("alarm", false),
        ]
    );
    assert!(flags.adr());
    assert!(!flags.alarm());
}

#[test]
fn payload_mask_names_every_bit() {
    let value = Field::PayloadMask.decode(&[0b0100_0001]).unwrap();
    let mask = value.as_payload_mask().unwrap();

    assert!(mask.alarm());
    assert!(mask.battery());
    assert!(!mask.gps());
    assert_eq!(
        value.to_string(),
        "{gps: 0, alarm: 1, bme: 0, counter: 0, sensor1: 0, sensor2: 0, sensor3: 0, battery: 1}"
    );
}

#[test]
fn widths_are_fixed() {
    let widths = [
        (Field::Uint8, 1),
        (Field::Uint16, 2),
        (Field::Uint32, 4),
        (Field::Uptime, 8),
        (Field::LatLng, 4),
        (Field::Hdop, 2),
        (Field::UFloat, 2),
        (Field::Pressure, 2),
        (Field::Float, 2),
        (Field::Version, 10),
        (Field::ConfigFlags, 1),
        (Field::PayloadMask, 1),
    ];

    for (field, width) in widths {
        assert_eq!(field.width(), width, "{field}");
    }
}

#[test]
fn wrong_window_length_is_rejected() {
    assert_eq!(
        Field::Uint16.decode(&[0x01]),
        Err(LengthMismatch {
            field: Field::Uint16,
            expected: 2,
            actual: 1,
        })
    );
    assert_eq!(
        Field::Uint8.decode(&[0x01, 0x02]),
        Err(LengthMismatch {
            field: Field::Uint8,
            expected: 1,
            actual: 2,
        })
    );
    assert!(Field::Version.decode(b"1.0").is_err());
    assert!(Field::LatLng.decode(&[]).is_err());
}
