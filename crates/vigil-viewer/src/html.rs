/// The viewer page: a single image element fed by the multipart stream.
pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Vigil - live detections</title>
    <style>
        body { background: #111; color: #eee; font-family: sans-serif; text-align: center; }
        img { margin-top: 1em; max-width: 95%; border: 1px solid #444; }
    </style>
</head>
<body>
    <h1>Live object detection</h1>
    <img src="/video_feed" alt="live detection stream">
</body>
</html>
"#;
