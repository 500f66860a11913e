diesel::table! {
    price_bars (symbol, date) {
        symbol -> Text,
        date -> Date,
        open -> Text,
        high -> Text,
        low -> Text,
        close -> Text,
        volume -> BigInt,
        created_at -> Timestamp,
    }
}
