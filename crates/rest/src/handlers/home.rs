//! API documentation page.

use axum::response::Html;

const HOME_PAGE: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
  <meta charset="utf-8">
  <title>Kuntur Detector API</title>
  <style>
    body { font-family: sans-serif; line-height: 1.5; max-width: 820px; margin: 0 auto; padding: 24px; color: #222; }
    h2 { margin-top: 28px; }
    .endpoint { border: 1px solid #ddd; border-radius: 4px; padding: 8px 12px; margin: 10px 0; }
    .method { font-weight: bold; color: #1a7f37; margin-right: 8px; }
    code, .path { font-family: monospace; }
    pre { background: #f6f8fa; padding: 12px; overflow-x: auto; }
  </style>
</head>
<body>
  <h1>Kuntur Detector API</h1>
  <p>Gestión de casos para las UPC de Ecuador.</p>
  <p>CORS habilitado para cualquier origen.</p>

  <h2>Endpoints</h2>

  <div class="endpoint">
    <p><span class="method">GET</span><span class="path">/healthcheck</span></p>
    <p>Estado del servidor y del almacenamiento activo.</p>
  </div>

  <div class="endpoint">
    <p><span class="method">POST</span><span class="path">/api/casos</span></p>
    <p>Crea un caso. Campos requeridos: <code>id_alarma</code>, <code>nombre_agente</code>,
    <code>cedula_agente</code>, <code>nombre_victima</code>, <code>cedula_victima</code>,
    <code>informe_policial</code>. Cualquier otro campo se guarda tal cual.</p>
  </div>

  <div class="endpoint">
    <p><span class="method">GET</span><span class="path">/api/casos</span></p>
    <p>Lista casos. Filtros opcionales: <code>id_caso</code>, <code>id_alarma</code>.</p>
  </div>

  <div class="endpoint">
    <p><span class="method">GET</span><span class="path">/api/casos/{id_caso}</span></p>
    <p>Obtiene un caso por su identificador.</p>
  </div>

  <div class="endpoint">
    <p><span class="method">POST</span><span class="path">/api/migrar-datos</span></p>
    <p>Copia los casos del archivo JSON a MongoDB, omitiendo los ya migrados.</p>
  </div>

  <div class="endpoint">
    <p><span class="method">GET</span><span class="path">/api/informes</span></p>
    <p>Lista los informes almacenados en MongoDB.</p>
  </div>

  <h2>Ejemplo</h2>
  <pre><code>fetch('/api/casos', {
  method: 'POST',
  headers: { 'Content-Type': 'application/json' },
  body: JSON.stringify({
    id_alarma: 'AL23072504',
    nombre_agente: 'Juan Pérez',
    cedula_agente: '1723456789',
    nombre_victima: 'María López',
    cedula_victima: '1712345678',
    informe_policial: 'Descripción del caso'
  })
}).then(r =&gt; r.json()).then(console.log);</code></pre>
</body>
</html>
"#;

/// Handler for the documentation page.
///
/// # HTTP Request
///
/// `GET /`
pub async fn home_handler() -> Html<&'static str> {
    Html(HOME_PAGE)
}
