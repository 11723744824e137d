pub fn render_index(backend_enabled: bool) -> String {
    let (badge_class, badge_text) = if backend_enabled {
        ("online", "backend connected")
    } else {
        ("offline", "backend not configured")
    };
    INDEX_HTML
        .replace("{{BADGE_CLASS}}", badge_class)
        .replace("{{BADGE_TEXT}}", badge_text)
}

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Guild Dashboard</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&display=swap');

    :root {
      --bg: #16181d;
      --card: #1f232b;
      --ink: #e8e6e3;
      --muted: #a0a0a0;
      --wipe: #ff6b4a;
      --ticket: #4ac1ff;
      --role: #c77dff;
      --deleted: #ffd166;
      --members: #06d6a0;
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    main {
      width: min(1080px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    header { display: flex; justify-content: space-between; align-items: center; }
    h1 { margin: 0; font-size: 1.8rem; }
    h2 { margin: 0 0 12px; font-size: 1.1rem; }

    .badge { border-radius: 999px; padding: 6px 12px; font-size: 0.8rem; }
    .badge.online { background: rgba(6, 214, 160, 0.15); color: var(--members); }
    .badge.offline { background: rgba(255, 107, 74, 0.15); color: var(--wipe); }

    section { background: var(--card); border-radius: 18px; padding: 20px; }

    .cards { display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); gap: 12px; }
    .card { background: rgba(255, 255, 255, 0.04); border-radius: 12px; padding: 14px; }
    .card .label { font-size: 0.75rem; text-transform: uppercase; letter-spacing: 0.1em; color: var(--muted); }
    .card .value { font-size: 1.6rem; font-weight: 600; }

    .tabs { display: flex; gap: 8px; margin-bottom: 12px; }
    .tabs button, .tool button {
      border: none; border-radius: 999px; padding: 8px 14px; cursor: pointer;
      background: rgba(255, 255, 255, 0.08); color: var(--ink);
    }
    .tabs button.active { background: var(--ticket); color: #10141a; }

    svg { width: 100%; height: 260px; }
    .chart-grid { stroke: rgba(255, 255, 255, 0.06); }
    .chart-label { fill: var(--muted); font-size: 10px; }
    .chart-line { fill: none; stroke-width: 2; }

    .tool { display: grid; grid-template-columns: 220px 1fr; gap: 16px; align-items: start; }
    .swatch { width: 100%; height: 120px; border-radius: 12px; border: 1px solid rgba(255, 255, 255, 0.1); }
    .tool input { width: 100%; background: transparent; border: 1px solid rgba(255, 255, 255, 0.12); color: var(--ink); padding: 6px 8px; border-radius: 8px; }
    .tool dl { display: grid; grid-template-columns: 80px 1fr; gap: 6px 10px; margin: 0; }
    .tool canvas { max-width: 100%; cursor: crosshair; margin-top: 10px; }

    .grid { display: grid; grid-template-columns: repeat(40, 1fr); gap: 3px; }
    .cell { aspect-ratio: 1; border-radius: 3px; background: rgba(255, 255, 255, 0.05); }
    .cell.filled { background: var(--members); cursor: pointer; }

    table { width: 100%; border-collapse: collapse; font-size: 0.9rem; }
    td, th { text-align: left; padding: 6px 4px; border-bottom: 1px solid rgba(255, 255, 255, 0.06); }
    #status { color: var(--muted); font-size: 0.85rem; }
  </style>
</head>
<body>
  <main>
    <header>
      <h1>Guild Dashboard</h1>
      <span class="badge {{BADGE_CLASS}}">{{BADGE_TEXT}}</span>
    </header>

    <section>
      <div class="tabs" id="range-tabs">
        <button data-days="1">1D</button>
        <button data-days="7">7D</button>
        <button data-days="30" class="active">30D</button>
      </div>
      <div class="cards">
        <div class="card"><div class="label">Wipes</div><div class="value" id="stat-wipes">0</div></div>
        <div class="card"><div class="label">Tickets</div><div class="value" id="stat-tickets">0</div></div>
        <div class="card"><div class="label">Tournament roles</div><div class="value" id="stat-roles">0</div></div>
        <div class="card"><div class="label">Deleted channels</div><div class="value" id="stat-deleted">0</div></div>
        <div class="card"><div class="label">Members</div><div class="value" id="stat-members">0</div></div>
      </div>
      <svg id="chart" viewBox="0 0 900 260" role="img" aria-label="Event timeline"></svg>
      <div id="status"></div>
    </section>

    <section>
      <h2>Auto-delete channels</h2>
      <table><thead><tr><th>Channel</th><th>Deletes in</th></tr></thead><tbody id="channels"></tbody></table>
    </section>

    <section>
      <h2>Maps</h2>
      <form id="map-form"><input type="file" name="map" accept=".map" /> <button type="submit">Upload</button></form>
      <table><thead><tr><th>Name</th><th>Size</th><th>Uploaded</th><th></th></tr></thead><tbody id="maps"></tbody></table>
    </section>

    <section class="tool">
      <div>
        <div class="swatch" id="swatch"></div>
        <input type="file" id="pipette-file" accept="image/*" />
      </div>
      <div>
        <dl>
          <dt>HEX</dt><dd><input id="pipette-hex" value="#000000" /></dd>
          <dt>RGB</dt><dd><input id="pipette-rgb" readonly /></dd>
          <dt>CMYK</dt><dd><input id="pipette-cmyk" readonly /></dd>
          <dt>HSV</dt><dd><input id="pipette-hsv" readonly /></dd>
          <dt>HSL</dt><dd><input id="pipette-hsl" readonly /></dd>
        </dl>
        <canvas id="pipette-canvas"></canvas>
      </div>
    </section>

    <section>
      <h2>Changelog</h2>
      <div class="grid" id="changelog"></div>
    </section>
  </main>

  <script>
    const SERIES = [
      ['wipe_created', 'var(--wipe)'],
      ['ticket_created', 'var(--ticket)'],
      ['tournament_role_created', 'var(--role)'],
      ['channel_deleted', 'var(--deleted)'],
      ['member_count', 'var(--members)']
    ];
    const statusEl = document.getElementById('status');
    const chartEl = document.getElementById('chart');

    const escapeHtml = (value) => String(value ?? '').replace(/[&<>"']/g, (c) => ({
      '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#39;'
    })[c]);

    const getJson = async (url, options) => {
      const response = await fetch(url, options);
      const body = await response.json();
      if (!response.ok) {
        throw new Error(body.error || `request failed (${response.status})`);
      }
      return body;
    };

    const renderChart = (timeline) => {
      const width = 900, height = 260, padX = 36, padY = 24;
      const max = Math.max(1, ...timeline.flatMap((b) => SERIES.map(([key]) => b[key] || 0)));
      const step = timeline.length > 1 ? (width - padX * 2) / (timeline.length - 1) : 0;
      const x = (i) => padX + i * step;
      const y = (v) => height - padY - (v / max) * (height - padY * 2);

      let grid = '';
      for (let i = 0; i <= 4; i += 1) {
        const value = (max * i) / 4;
        grid += `<line class="chart-grid" x1="${padX}" y1="${y(value)}" x2="${width - padX}" y2="${y(value)}" />`;
        grid += `<text class="chart-label" x="${padX - 6}" y="${y(value) + 3}" text-anchor="end">${Math.round(value)}</text>`;
      }
      const lines = SERIES.map(([key, color]) => {
        const d = timeline.map((b, i) => `${i === 0 ? 'M' : 'L'} ${x(i).toFixed(1)} ${y(b[key] || 0).toFixed(1)}`).join(' ');
        return `<path class="chart-line" stroke="${color}" d="${d}" />`;
      }).join('');
      const every = Math.max(1, Math.ceil(timeline.length / 10));
      const labels = timeline.map((b, i) => i % every === 0
        ? `<text class="chart-label" x="${x(i)}" y="${height - 6}" text-anchor="middle">${b.date.slice(5)}</text>`
        : '').join('');
      chartEl.innerHTML = grid + lines + labels;
    };

    const loadStats = async (days) => {
      const data = await getJson(`/api/stats?days=${days}`);
      document.getElementById('stat-wipes').textContent = data.wipe_created;
      document.getElementById('stat-tickets').textContent = data.ticket_created;
      document.getElementById('stat-roles').textContent = data.tournament_role_created;
      document.getElementById('stat-deleted').textContent = data.channel_deleted;
      document.getElementById('stat-members').textContent = data.member_count;
      statusEl.textContent = data.degraded ? 'Event source unavailable, showing an empty window.' : `${data.total} events`;
      renderChart(data.timeline);
    };

    const loadChannels = async () => {
      const body = document.getElementById('channels');
      try {
        const rows = await getJson('/api/auto-delete-channels');
        body.innerHTML = rows.map((row) => {
          const left = row.time_left_seconds;
          const text = `${Math.floor(left / 3600)}h ${Math.floor((left % 3600) / 60)}m`;
          return `<tr><td>${escapeHtml(row.channel_name || row.channel_id || '?')}</td><td>${text}</td></tr>`;
        }).join('');
      } catch (err) {
        body.innerHTML = `<tr><td colspan="2">${escapeHtml(err.message)}</td></tr>`;
      }
    };

    const loadMaps = async () => {
      const body = document.getElementById('maps');
      try {
        const maps = await getJson('/api/maps');
        body.innerHTML = maps.map((map) => {
          const id = escapeHtml(encodeURIComponent(map.id));
          return `<tr>
          <td><a href="/api/maps/download/${id}">${escapeHtml(map.original_name)}</a></td>
          <td>${(map.file_size / 1024).toFixed(1)} KiB</td>
          <td>${escapeHtml(map.uploaded_at.slice(0, 16).replace('T', ' '))}</td>
          <td><button data-delete="${id}">Delete</button></td></tr>`;
        }).join('');
      } catch (err) {
        body.innerHTML = `<tr><td colspan="4">${escapeHtml(err.message)}</td></tr>`;
      }
    };

    const showColor = (report) => {
      document.getElementById('swatch').style.background = report.hex;
      document.getElementById('pipette-hex').value = report.hex;
      document.getElementById('pipette-rgb').value = report.rgb;
      document.getElementById('pipette-cmyk').value = report.cmyk;
      document.getElementById('pipette-hsv').value = report.hsv;
      document.getElementById('pipette-hsl').value = report.hsl;
    };

    const loadChangelog = async () => {
      const slots = await getJson('/api/changelog');
      const grid = document.getElementById('changelog');
      grid.innerHTML = slots.map((entry, i) => entry
        ? `<div class="cell filled" data-index="${i}" title="${escapeHtml(entry.date.slice(0, 10))} · ${escapeHtml(entry.views)} views"></div>`
        : '<div class="cell"></div>').join('');
    };

    document.getElementById('range-tabs').addEventListener('click', (event) => {
      const button = event.target.closest('button');
      if (!button) return;
      document.querySelectorAll('#range-tabs button').forEach((b) => b.classList.toggle('active', b === button));
      loadStats(button.dataset.days).catch((err) => { statusEl.textContent = err.message; });
    });

    document.getElementById('maps').addEventListener('click', async (event) => {
      const id = event.target.dataset.delete;
      if (!id) return;
      await getJson(`/api/maps/${id}`, { method: 'DELETE' }).catch((err) => alert(err.message));
      loadMaps();
    });

    document.getElementById('map-form').addEventListener('submit', async (event) => {
      event.preventDefault();
      await getJson('/api/maps/upload', { method: 'POST', body: new FormData(event.target) })
        .catch((err) => alert(err.message));
      event.target.reset();
      loadMaps();
    });

    document.getElementById('pipette-hex').addEventListener('change', (event) => {
      getJson(`/api/color?hex=${encodeURIComponent(event.target.value)}`).then(showColor).catch(() => {});
    });

    const canvas = document.getElementById('pipette-canvas');
    document.getElementById('pipette-file').addEventListener('change', (event) => {
      const file = event.target.files[0];
      if (!file) return;
      const img = new Image();
      img.onload = () => {
        const ratio = Math.min(1, 640 / img.width);
        canvas.width = Math.max(1, Math.floor(img.width * ratio));
        canvas.height = Math.max(1, Math.floor(img.height * ratio));
        canvas.getContext('2d').drawImage(img, 0, 0, canvas.width, canvas.height);
      };
      img.src = URL.createObjectURL(file);
    });
    canvas.addEventListener('click', (event) => {
      const rect = canvas.getBoundingClientRect();
      const cx = Math.floor((event.clientX - rect.left) * (canvas.width / rect.width));
      const cy = Math.floor((event.clientY - rect.top) * (canvas.height / rect.height));
      const [r, g, b] = canvas.getContext('2d').getImageData(cx, cy, 1, 1).data;
      getJson(`/api/color?r=${r}&g=${g}&b=${b}`).then(showColor).catch(() => {});
    });

    document.getElementById('changelog').addEventListener('click', async (event) => {
      const index = event.target.dataset.index;
      if (index === undefined) return;
      await getJson(`/api/changelog/${index}/view`, { method: 'POST' }).catch(() => {});
      loadChangelog();
    });

    loadStats(30).catch((err) => { statusEl.textContent = err.message; });
    loadChannels();
    loadMaps();
    loadChangelog();
  </script>
</body>
</html>
"##;
