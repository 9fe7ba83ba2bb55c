use futures::FutureExt;
use rebind_dns_infrastructure::dns::transport::tcp::{read_query_frame, write_framed};
use rebind_dns_infrastructure::dns::DnsQueryHandler;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

const MAX_UDP_MESSAGE_SIZE: usize = 4096;
const TCP_BACKLOG: i32 = 1024;

/// Running UDP and TCP listeners. Dropping the handle does not stop them; call
/// [`DnsServerHandle::shutdown`].
pub struct DnsServerHandle {
    udp_addr: SocketAddr,
    tcp_addr: SocketAddr,
    tasks: JoinSet<()>,
}

impl DnsServerHandle {
    pub fn udp_addr(&self) -> SocketAddr {
        self.udp_addr
    }

    pub fn tcp_addr(&self) -> SocketAddr {
        self.tcp_addr
    }

    /// Resolves when either listener exits.
    pub async fn closed(&mut self) {
        let _ = self.tasks.join_next().await;
    }

    /// Stops accepting datagrams and connections. In-flight requests are abandoned.
    pub async fn shutdown(mut self) {
        self.tasks.abort_all();
        while self.tasks.join_next().await.is_some() {}
        info!("DNS listeners stopped");
    }
}

pub async fn start_dns_server(
    bind_addr: SocketAddr,
    handler: Arc<DnsQueryHandler>,
    tcp_timeout: Duration,
) -> anyhow::Result<DnsServerHandle> {
    let domain = if bind_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let udp_socket = create_udp_socket(domain, bind_addr)?;
    let udp_addr = udp_socket.local_addr()?;

    // Port 0 lets UDP pick the port; TCP follows it.
    let tcp_listener = create_tcp_listener(domain, udp_addr)?;
    let tcp_addr = tcp_listener.local_addr()?;

    let mut tasks = JoinSet::new();

    let handler_udp = Arc::clone(&handler);
    tasks.spawn(async move {
        run_udp(Arc::new(udp_socket), handler_udp).await;
    });

    tasks.spawn(async move {
        run_tcp(tcp_listener, handler, tcp_timeout).await;
    });

    info!(udp = %udp_addr, tcp = %tcp_addr, "DNS server ready");

    Ok(DnsServerHandle {
        udp_addr,
        tcp_addr,
        tasks,
    })
}

async fn run_udp(socket: Arc<UdpSocket>, handler: Arc<DnsQueryHandler>) {
    let mut recv_buf = vec![0u8; MAX_UDP_MESSAGE_SIZE];

    loop {
        let (len, peer) = match socket.recv_from(&mut recv_buf).await {
            Ok(received) => received,
            Err(e) if is_transient(&e) => {
                debug!(error = %e, "Transient UDP receive error");
                continue;
            }
            Err(e) => {
                error!(error = %e, "UDP receive failed, listener stopping");
                break;
            }
        };

        let request: Arc<[u8]> = Arc::from(&recv_buf[..len]);
        let socket = Arc::clone(&socket);
        let handler = Arc::clone(&handler);

        tokio::spawn(async move {
            let outcome = AssertUnwindSafe(handler.handle(&request, peer, "UDP"))
                .catch_unwind()
                .await;

            match outcome {
                Ok(Some(response)) => {
                    if let Err(e) = socket.send_to(&response, peer).await {
                        warn!(client = %peer, error = %e, "Failed to send UDP response");
                    }
                }
                Ok(None) => {}
                Err(_) => error!(client = %peer, "UDP request handler panicked"),
            }
        });
    }
}

async fn run_tcp(listener: TcpListener, handler: Arc<DnsQueryHandler>, tcp_timeout: Duration) {
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(error = %e, "TCP accept failed");
                tokio::time::sleep(Duration::from_millis(10)).await;
                continue;
            }
        };

        let handler = Arc::clone(&handler);

        tokio::spawn(async move {
            let outcome = AssertUnwindSafe(serve_connection(stream, peer, &handler, tcp_timeout))
                .catch_unwind()
                .await;

            if outcome.is_err() {
                error!(client = %peer, "TCP request handler panicked");
            }
        });
    }
}

/// One request, one response, then the connection is closed.
async fn serve_connection(
    mut stream: TcpStream,
    peer: SocketAddr,
    handler: &DnsQueryHandler,
    tcp_timeout: Duration,
) {
    let request = match tokio::time::timeout(tcp_timeout, read_query_frame(&mut stream)).await {
        Ok(Ok(request)) => request,
        Ok(Err(e)) => {
            warn!(client = %peer, error = %e, "Dropping TCP connection");
            return;
        }
        Err(_) => {
            warn!(client = %peer, "TCP read timed out");
            return;
        }
    };

    let Some(response) = handler.handle(&request, peer, "TCP").await else {
        return;
    };

    match tokio::time::timeout(tcp_timeout, write_framed(&mut stream, &response)).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!(client = %peer, error = %e, "Failed to send TCP response"),
        Err(_) => warn!(client = %peer, "TCP write timed out"),
    }
}

fn is_transient(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::Interrupted
            | io::ErrorKind::WouldBlock
    )
}

fn create_udp_socket(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}

fn create_tcp_listener(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<TcpListener> {
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(TCP_BACKLOG)?;
    socket.set_nonblocking(true)?;
    let std_listener: std::net::TcpListener = socket.into();
    Ok(TcpListener::from_std(std_listener)?)
}
