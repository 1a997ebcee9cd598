use anyhow::Result;
use edntree::read::{parse_reader, write_all};
use edntree::settings::Settings;

const INPUT: &[u8] = include_bytes!("t-input.edn");
const EXPECTED: &[u8] = include_bytes!("t-expected.edn");

#[test]
fn t1() -> Result<()> {
    let vals = parse_reader(INPUT, &Settings::default());
    let mut out = Vec::<u8>::new();
    write_all(&mut out, &vals)?;
    assert_eq!(String::from_utf8(out)?, String::from_utf8(EXPECTED.to_vec())?);
    Ok(())
}
