use simple_json_stream::JsonStreamParser;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut parser = JsonStreamParser::new();
    parser.set_callback(|value| {
        println!("extracted: {value}");
        Ok(())
    });

    // Two chunks, split in the middle of a string.
    parser.stream("{\"test\": \"this is ")?;
    parser.stream("a test\"} [1,2,3]")?;

    let entities = parser.flush()?;
    println!("{} values extracted", entities.len());
    Ok(())
}
