//! Sample traffic shared by the benchmarks.

/// Named raw requests: four attacks and one ordinary browser request.
pub const SAMPLE_REQUESTS: [(&str, &str); 5] = [
    (
        "form_tautology",
        "POST /login HTTP/1.1\nHost: example.com\n\
         Content-Type: application/x-www-form-urlencoded\n\n\
         username=admin&password=' OR '1'='1",
    ),
    (
        "query_union",
        "GET /search?id=1'%20UNION%20SELECT%20username,%20password%20FROM%20users-- HTTP/1.1\n\
         Host: example.com",
    ),
    (
        "json_stacked",
        "POST /api/update HTTP/1.1\nContent-Type: application/json\n\n\
         {\"email\": \"test@ex.com'; DROP TABLE users; --\"}",
    ),
    (
        "cookie_tautology",
        "GET /profile HTTP/1.1\nHost: example.com\nCookie: session=abc' OR '1'='1",
    ),
    (
        "browser_benign",
        "GET /products?category=shoes&sort=price_asc&page=2 HTTP/1.1\r\n\
         Host: shop.example.com\r\n\
         User-Agent: Mozilla/5.0 (X11; Linux x86_64) Gecko/20100101 Firefox/121.0\r\n\
         Referer: https://shop.example.com/\r\n\
         Cookie: sid=8f14e45f; theme=dark\r\n\r\n",
    ),
];
