use simple_json_stream::JsonStreamParser;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:8089/test".into());

    let mut parser = JsonStreamParser::new();
    parser.set_callback(|value| {
        println!("extracted: {value}");
        Ok(())
    });

    let entities = parser.stream_from_url(&url, 30)?;
    println!("{} values extracted from {url}", entities.len());
    Ok(())
}
