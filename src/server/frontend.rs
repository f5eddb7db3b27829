//! Embedded HTML pages for the dev server.
//!
//! Both pages are compiled into the binary as string constants. Behavior
//! comes from the wasm bundle under `/pkg/`; Chart.js is loaded from its CDN
//! because the charts are drawn through it.

/// The dashboard page: upload, generate, metrics and live charts.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Timetable Generator</title>
<style>
:root {
  --brand: #117964;
  --brand-light: #19be94;
  --accent: #0b96ff;
  --warn: #ffc107;
  --bg: #f4f8f7;
  --surface: #ffffff;
  --border: #d5e3df;
  --text: #1d2b28;
  --muted: #5f7470;
  --radius: 10px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body { background: var(--bg); color: var(--text); font-family: var(--font); font-size: 15px; }

/* Navbar */
.aitu-navbar {
  position: sticky; top: 0; z-index: 10;
  display: flex; align-items: center; justify-content: space-between;
  padding: 12px 24px; background: var(--brand); color: #fff;
}
.aitu-navbar .brand { font-weight: 700; font-size: 18px; }
#aitu-menu-toggle { display: none; }
.aitu-menu-icon { display: none; cursor: pointer; font-size: 22px; }
.aitu-menu-items { display: flex; gap: 20px; }
.aitu-menu-items a { color: #fff; text-decoration: none; }
.aitu-menu-items a:hover { text-decoration: underline; }

@media (max-width: 720px) {
  .aitu-menu-icon { display: block; }
  .aitu-menu-items {
    display: none; position: absolute; top: 100%; left: 0; right: 0;
    flex-direction: column; padding: 12px 24px; background: var(--brand);
  }
  #aitu-menu-toggle:checked ~ .aitu-menu-items { display: flex; }
}

/* Layout */
.app { max-width: 1200px; margin: 0 auto; padding: 24px; }
.card {
  background: var(--surface); border: 1px solid var(--border);
  border-radius: var(--radius); padding: 20px; margin-bottom: 20px;
}
.card h2 { font-size: 18px; margin-bottom: 14px; color: var(--brand); }

.trimesters { display: flex; gap: 18px; margin-bottom: 14px; }

.drop-zone {
  border: 2px dashed var(--border); border-radius: var(--radius);
  padding: 28px; text-align: center; color: var(--muted); cursor: pointer;
  transition: border-color .15s, background .15s;
}
.drop-zone.dragover { border-color: var(--brand); background: #e7f5f1; }
.drop-zone input[type=file] { display: none; }
.file-name { margin-top: 8px; font-weight: 600; color: var(--text); }

.btn {
  display: inline-block; margin-top: 14px; padding: 10px 18px;
  border: none; border-radius: 6px; background: var(--brand); color: #fff;
  font-size: 15px; cursor: pointer;
}
.btn:disabled { opacity: .6; cursor: progress; }
.btn.secondary { background: var(--accent); }

.spinner-border {
  display: inline-block; width: 1em; height: 1em; vertical-align: -0.125em;
  border: .15em solid currentColor; border-right-color: transparent;
  border-radius: 50%; animation: spin .75s linear infinite;
}
@keyframes spin { to { transform: rotate(360deg); } }

/* Metrics */
.metrics { display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); gap: 12px; }
.metric { border: 1px solid var(--border); border-radius: var(--radius); padding: 14px; }
.metric .label { color: var(--muted); font-size: 13px; }
.metric .value { font-size: 22px; font-weight: 700; margin-top: 4px; }
#fitnessInterpretation { margin-top: 14px; }

.charts { display: grid; grid-template-columns: repeat(auto-fit, minmax(320px, 1fr)); gap: 16px; }
#downloadLinks { display: none; gap: 10px; }
</style>
</head>
<body>

<nav class="aitu-navbar">
  <span class="brand">AITU Scheduler</span>
  <input type="checkbox" id="aitu-menu-toggle">
  <label for="aitu-menu-toggle" class="aitu-menu-icon">&#9776;</label>
  <div class="aitu-menu-items">
    <a href="/" id="generateScheduleLink">Generate Schedule</a>
    <a href="/check">Check Schedule</a>
  </div>
</nav>

<main class="app" id="main-content">

  <section class="card">
    <h2>Generate Schedule</h2>

    <div class="trimesters">
      <label><input type="radio" name="trimester" value="1" checked> Trimester 1</label>
      <label><input type="radio" name="trimester" value="2"> Trimester 2</label>
      <label><input type="radio" name="trimester" value="3"> Trimester 3</label>
    </div>

    <div class="drop-zone" id="fileDropArea">
      <p>Drag &amp; drop your GA Input Excel file here, or click to browse</p>
      <input type="file" id="datasetUpload" accept=".xlsx,.xls">
      <div class="file-name" id="fileNameDisplay"></div>
    </div>

    <button class="btn" id="generateBtn">Generate Schedule</button>

    <div id="downloadLinks">
      <button class="btn secondary" id="downloadExcel">Download Excel</button>
      <button class="btn secondary" id="downloadJson">Download JSON</button>
    </div>
  </section>

  <section class="card">
    <h2>Results</h2>
    <div class="metrics">
      <div class="metric"><div class="label">Fitness Score</div><div class="value" id="fitnessScore">-</div></div>
      <div class="metric"><div class="label">Conflicts</div><div class="value" id="conflictsCount">-</div></div>
      <div class="metric"><div class="label">Hard Constraints</div><div class="value" id="hardConstraints">-</div></div>
      <div class="metric"><div class="label">Soft Constraints</div><div class="value" id="softConstraints">-</div></div>
      <div class="metric"><div class="label">Generation Time</div><div class="value" id="genTime">-</div></div>
    </div>
    <div id="fitnessInterpretation"></div>
  </section>

  <section class="card">
    <h2>Fitness Score Trend</h2>
    <canvas id="fitnessTrendChart"></canvas>
  </section>

  <section class="card">
    <h2>System Load</h2>
    <div class="charts">
      <canvas id="cpuChart"></canvas>
      <canvas id="ramChart"></canvas>
      <canvas id="memoryChart"></canvas>
    </div>
  </section>

</main>

<script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
<script type="module">
  import init from '/pkg/timetable_dash.js';
  init();
</script>
</body>
</html>
"##;

/// The schedule checker page. The form posts to the backend's `/check`.
pub const CHECK_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Check Schedule</title>
<style>
:root { --brand: #117964; --border: #d5e3df; --muted: #5f7470; --radius: 10px; }
* { margin: 0; padding: 0; box-sizing: border-box; }
body { background: #f4f8f7; color: #1d2b28; font-family: -apple-system, 'Segoe UI', Helvetica, Arial, sans-serif; }
.aitu-navbar { display: flex; justify-content: space-between; padding: 12px 24px; background: var(--brand); color: #fff; }
.aitu-navbar a { color: #fff; text-decoration: none; margin-left: 20px; }
.app { max-width: 900px; margin: 0 auto; padding: 24px; }
.drop-zone {
  border: 2px dashed var(--border); border-radius: var(--radius); background: #fff;
  padding: 28px; margin-bottom: 16px; text-align: center; color: var(--muted); cursor: pointer;
}
.drop-zone.dragover { border-color: var(--brand); background: #e7f5f1; }
.drop-zone input[type=file] { display: none; }
.file-name { margin-top: 8px; font-weight: 600; color: #1d2b28; }
.btn { padding: 10px 18px; border: none; border-radius: 6px; background: var(--brand); color: #fff; cursor: pointer; }
</style>
</head>
<body>

<nav class="aitu-navbar">
  <strong>AITU Scheduler</strong>
  <div class="aitu-menu-items">
    <a href="/">Generate Schedule</a>
    <a href="/check">Check Schedule</a>
  </div>
</nav>

<main class="app" id="main-content">
  <form method="post" action="/check" enctype="multipart/form-data">
    <div class="drop-zone" id="timetable-zone">
      <p>Drop the generated timetable JSON here, or click to browse</p>
      <input type="file" id="timetable" name="timetable" accept=".json" required>
      <div class="file-name" id="timetable-name"></div>
    </div>

    <div class="drop-zone" id="gainput-zone">
      <p>Drop the GA Input Excel file here (optional)</p>
      <input type="file" id="ga_input" name="ga_input" accept=".xlsx,.xls">
      <div class="file-name" id="ga-name"></div>
    </div>

    <button class="btn" type="submit">Check Schedule</button>
  </form>
</main>

<script type="module">
  import init from '/pkg/timetable_dash.js';
  init();
</script>
</body>
</html>
"##;
