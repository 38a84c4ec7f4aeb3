use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    println!("listening on {addr}");
    let script = mock_server::reply(
        "HTTP/1.1 200 OK",
        &[("Content-Type", "text/html"), ("Connection", "close")],
        "<html><body>mock page</body></html>\n",
    );
    mock_server::run(listener, script).await
}
