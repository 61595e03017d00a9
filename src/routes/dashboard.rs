use axum::{
    http::header,
    response::{Html, IntoResponse},
};

pub async fn dashboard() -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, "public, max-age=60")],
        Html(DASHBOARD_HTML),
    )
}

const DASHBOARD_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Reformer Burner Monitor</title>
    <style>
        :root {
            --bg: #0f172a;
            --surface: #1e293b;
            --border: #334155;
            --text: #e2e8f0;
            --muted: #94a3b8;
            --accent: #38bdf8;
            --both: #22c55e;
            --ng: #eab308;
            --og: #3b82f6;
            --capped: #6b7280;
            --danger: #ef4444;
        }
        * { box-sizing: border-box; margin: 0; padding: 0; }
        body { font-family: system-ui, -apple-system, sans-serif; background: var(--bg); color: var(--text); min-height: 100vh; }

        .container {
            max-width: 1280px;
            margin: 0 auto;
            padding: 1.5rem;
        }

        header {
            display: flex;
            justify-content: space-between;
            align-items: center;
            margin-bottom: 1.5rem;
            flex-wrap: wrap;
            gap: 1rem;
        }
        h1 { font-size: 1.25rem; font-weight: 600; }
        h2 { font-size: 1rem; font-weight: 600; margin-bottom: 0.75rem; }

        .card {
            background: var(--surface);
            border: 1px solid var(--border);
            border-radius: 0.5rem;
            padding: 1.25rem;
            margin-bottom: 1.25rem;
        }

        /* Login */
        .login-wrap {
            max-width: 360px;
            margin: 10vh auto 0;
        }
        .login-wrap label { display: block; font-size: 0.8125rem; color: var(--muted); margin: 0.75rem 0 0.25rem; }
        .login-wrap input {
            width: 100%;
            padding: 0.5rem 0.75rem;
            border: 1px solid var(--border);
            border-radius: 0.375rem;
            background: var(--bg);
            color: var(--text);
            font-size: 0.875rem;
        }
        .login-error { color: var(--danger); font-size: 0.8125rem; margin-top: 0.75rem; min-height: 1.25rem; }

        button {
            padding: 0.5rem 1rem;
            border: 1px solid var(--border);
            border-radius: 0.375rem;
            background: var(--surface);
            color: var(--text);
            font-size: 0.875rem;
            cursor: pointer;
        }
        button:hover { border-color: var(--accent); }
        button.primary { background: var(--accent); border-color: var(--accent); color: #082f49; font-weight: 600; }
        button:disabled { opacity: 0.5; cursor: wait; }

        /* Tabs */
        .tabs { display: flex; gap: 0.5rem; margin-bottom: 1.25rem; flex-wrap: wrap; }
        .tab-btn.active { background: var(--accent); border-color: var(--accent); color: #082f49; font-weight: 600; }
        .tab-panel { display: none; }
        .tab-panel.active { display: block; }

        /* Burner grid */
        .walls { display: grid; grid-template-columns: repeat(auto-fit, minmax(520px, 1fr)); gap: 1.25rem; }
        .wall-title { display: flex; justify-content: space-between; align-items: baseline; margin-bottom: 0.5rem; }
        .wall-grid {
            display: grid;
            grid-template-columns: repeat(15, 1fr);
            gap: 3px;
        }
        .cell {
            aspect-ratio: 1;
            border-radius: 3px;
            border: 1px solid transparent;
            font-size: 0.625rem;
            color: #0b1120;
            display: flex;
            align-items: center;
            justify-content: center;
            cursor: pointer;
            user-select: none;
        }
        .cell:hover { border-color: var(--text); }
        .cell.B { background: var(--both); }
        .cell.N { background: var(--ng); }
        .cell.O { background: var(--og); }
        .cell.C { background: var(--capped); color: var(--text); }
        .legend { display: flex; gap: 1rem; font-size: 0.8125rem; color: var(--muted); margin-bottom: 1rem; flex-wrap: wrap; }
        .dist-bar { display: flex; height: 8px; border-radius: 4px; overflow: hidden; margin-top: 0.625rem; background: var(--bg); }
        .dist-bar span { display: block; }
        .dist-counts { display: flex; gap: 0.75rem; align-items: center; font-size: 0.75rem; color: var(--muted); margin-top: 0.375rem; flex-wrap: wrap; }
        .legend .swatch { display: inline-block; width: 0.75rem; height: 0.75rem; border-radius: 2px; margin-right: 0.3rem; vertical-align: -1px; }

        /* Severity badges */
        .badge { padding: 0.125rem 0.5rem; border-radius: 999px; font-size: 0.75rem; font-weight: 600; }
        .badge.normal { background: #14532d; color: #86efac; }
        .badge.warning { background: #713f12; color: #fde047; }
        .badge.major { background: #7c2d12; color: #fdba74; }
        .badge.critical { background: #7f1d1d; color: #fca5a5; }

        /* Tables */
        table { width: 100%; border-collapse: collapse; font-size: 0.8125rem; }
        th, td { text-align: left; padding: 0.5rem 0.75rem; border-bottom: 1px solid var(--border); }
        th { color: var(--muted); font-weight: 500; }

        /* Forms */
        .form-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); gap: 0.75rem 1rem; }
        .form-grid label { display: block; font-size: 0.8125rem; color: var(--muted); margin-bottom: 0.25rem; }
        .form-grid input, .form-grid select {
            width: 100%;
            padding: 0.4rem 0.6rem;
            border: 1px solid var(--border);
            border-radius: 0.375rem;
            background: var(--bg);
            color: var(--text);
            font-size: 0.875rem;
        }
        .form-actions { margin-top: 1rem; display: flex; gap: 0.75rem; align-items: center; }
        .form-note { font-size: 0.8125rem; color: var(--muted); }

        /* Cell popover */
        .popover {
            position: fixed;
            background: var(--surface);
            border: 1px solid var(--border);
            border-radius: 0.5rem;
            padding: 0.75rem;
            z-index: 20;
            display: none;
            flex-direction: column;
            gap: 0.375rem;
            box-shadow: 0 8px 24px rgba(0,0,0,0.5);
        }
        .popover.open { display: flex; }
        .popover .pop-title { font-size: 0.8125rem; color: var(--muted); margin-bottom: 0.25rem; }

        .empty { color: var(--muted); font-size: 0.875rem; padding: 1rem 0; }
        .conn { font-size: 0.75rem; color: var(--muted); }
        .conn.live { color: var(--both); }
    </style>
</head>
<body>
    <!-- Login view -->
    <div id="login-view" class="container login-wrap">
        <div class="card">
            <h1>Reformer Burner Monitor</h1>
            <label for="employee-id">Employee ID</label>
            <input id="employee-id" autocomplete="username">
            <label for="password">Password</label>
            <input id="password" type="password" autocomplete="current-password">
            <div class="login-error" id="login-error"></div>
            <button class="primary" id="login-btn">Sign in</button>
        </div>
    </div>

    <!-- Dashboard view -->
    <div id="dash-view" class="container" style="display:none">
        <header>
            <h1>Reformer Burner Monitor</h1>
            <div style="display:flex; gap:1rem; align-items:center">
                <span class="conn" id="conn-state">connecting…</span>
                <span id="who" style="font-size:0.8125rem; color:var(--muted)"></span>
                <button id="logout-btn">Sign out</button>
            </div>
        </header>

        <div class="tabs">
            <button class="tab-btn active" data-tab="grid">Heat map</button>
            <button class="tab-btn" data-tab="data">Burner data</button>
            <button class="tab-btn" data-tab="cleaning">Cleaning log</button>
            <button class="tab-btn" data-tab="temps">Temperatures</button>
            <button class="tab-btn" data-tab="alarms">Alarms</button>
        </div>

        <section id="tab-grid" class="tab-panel active">
            <div class="legend">
                <span><span class="swatch" style="background:var(--both)"></span>B · Both</span>
                <span><span class="swatch" style="background:var(--ng)"></span>N · NG only</span>
                <span><span class="swatch" style="background:var(--og)"></span>O · Off-gas only</span>
                <span><span class="swatch" style="background:var(--capped)"></span>C · Capped</span>
            </div>
            <div class="walls" id="walls"></div>
        </section>

        <section id="tab-data" class="tab-panel">
            <div class="card">
                <h2>Burner data</h2>
                <table>
                    <thead><tr><th>Wall</th><th>Row</th><th>Burner</th><th>State</th><th>Updated</th></tr></thead>
                    <tbody id="data-body"></tbody>
                </table>
            </div>
        </section>

        <section id="tab-alarms" class="tab-panel">
            <div class="card">
                <h2>Wall balance</h2>
                <table>
                    <thead><tr><th>Wall</th><th>B</th><th>N</th><th>O</th><th>C</th><th>|N − O|</th><th>Severity</th></tr></thead>
                    <tbody id="analytics-body"></tbody>
                </table>
            </div>
            <div class="card">
                <h2>Active alarms</h2>
                <div id="alarms"></div>
            </div>
        </section>

        <section id="tab-temps" class="tab-panel">
            <div class="card">
                <h2>New reading</h2>
                <div class="form-grid">
                    <div><label>Shift</label><select id="t-shift"><option>Morning</option><option>Evening</option><option>Night</option></select></div>
                    <div><label>A/B COT (°C)</label><input id="t-ab" type="number" step="0.1"></div>
                    <div><label>C/D COT (°C)</label><input id="t-cd" type="number" step="0.1"></div>
                    <div><label>Flue gas (°C)</label><input id="t-flue" type="number" step="0.1"></div>
                    <div><label>Excess O₂ (%)</label><input id="t-o2" type="number" step="0.01"></div>
                    <div><label>Prereformer max (°C)</label><input id="t-premax" type="number" step="0.1"></div>
                    <div><label>Prereformer min (°C)</label><input id="t-premin" type="number" step="0.1"></div>
                </div>
                <div class="form-actions">
                    <button class="primary" id="temp-save">Save reading</button>
                    <span class="form-note" id="temp-note"></span>
                </div>
            </div>
            <div class="card">
                <h2>Recent readings</h2>
                <table>
                    <thead><tr><th>Time</th><th>Shift</th><th>A/B COT</th><th>C/D COT</th><th>Flue gas</th><th>O₂</th><th>Pre max</th><th>Pre min</th></tr></thead>
                    <tbody id="temps-body"></tbody>
                </table>
            </div>
        </section>

        <section id="tab-cleaning" class="tab-panel">
            <div class="card">
                <h2>Cleaning log</h2>
                <table>
                    <thead><tr><th>Burner</th><th>Cleaned at</th></tr></thead>
                    <tbody id="cleaning-body"></tbody>
                </table>
            </div>
        </section>
    </div>

    <!-- State picker for a burner cell -->
    <div class="popover" id="popover">
        <div class="pop-title" id="pop-title"></div>
        <button data-state="B">B · Both</button>
        <button data-state="N">N · NG only</button>
        <button data-state="O">O · Off-gas only</button>
        <button data-state="C">C · Capped</button>
    </div>

<script>
(function () {
    'use strict';

    const WALLS = ['A', 'B', 'C', 'D'];
    const ROWS = 6, COLS = 15;

    let token = sessionStorage.getItem('token') || '';
    let employeeId = sessionStorage.getItem('employee_id') || '';
    let burners = new Map();   // "A/1/1" -> row object
    let source = null;

    const $ = (id) => document.getElementById(id);

    function keyOf(b) { return b.wall + '/' + b.row + '/' + b.burner_num; }

    function authHeaders() {
        return { 'Authorization': 'Bearer ' + token, 'Content-Type': 'application/json' };
    }

    async function api(path, opts) {
        const res = await fetch(path, Object.assign({ headers: authHeaders() }, opts || {}));
        if (res.status === 401) { showLogin(); throw new Error('session expired'); }
        if (!res.ok) {
            let msg = 'request failed';
            try { msg = (await res.json()).error || msg; } catch (e) {}
            throw new Error(msg);
        }
        return res.status === 204 ? null : res.json();
    }

    // --- Login ---

    async function sha256Hex(text) {
        const data = new TextEncoder().encode(text);
        const digest = await crypto.subtle.digest('SHA-256', data);
        return Array.from(new Uint8Array(digest)).map(b => b.toString(16).padStart(2, '0')).join('');
    }

    async function doLogin() {
        const btn = $('login-btn');
        btn.disabled = true;
        $('login-error').textContent = '';
        try {
            const passwordHash = await sha256Hex($('password').value);
            const res = await fetch('/api/auth/login', {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify({ employee_id: $('employee-id').value.trim(), password_hash: passwordHash })
            });
            if (!res.ok) {
                const body = await res.json().catch(() => ({}));
                $('login-error').textContent = body.error || 'Login failed.';
                return;
            }
            const session = await res.json();
            token = session.token;
            employeeId = session.employee_id;
            sessionStorage.setItem('token', token);
            sessionStorage.setItem('employee_id', employeeId);
            showDashboard();
        } catch (e) {
            $('login-error').textContent = 'Connection error. Please try again.';
        } finally {
            btn.disabled = false;
        }
    }

    function showLogin() {
        if (source) { source.close(); source = null; }
        token = '';
        employeeId = '';
        sessionStorage.removeItem('token');
        sessionStorage.removeItem('employee_id');
        $('dash-view').style.display = 'none';
        $('login-view').style.display = 'block';
        $('password').value = '';
    }

    async function doLogout() {
        try { await api('/api/auth/logout', { method: 'POST' }); } catch (e) {}
        showLogin();
    }

    // --- Burner grid ---

    function buildWalls() {
        const container = $('walls');
        container.innerHTML = '';
        for (const wall of WALLS) {
            const card = document.createElement('div');
            card.className = 'card';
            card.innerHTML = '<div class="wall-title"><h2>Wall ' + wall + '</h2></div>';
            const grid = document.createElement('div');
            grid.className = 'wall-grid';
            for (let row = 1; row <= ROWS; row++) {
                for (let num = 1; num <= COLS; num++) {
                    const cell = document.createElement('div');
                    cell.className = 'cell C';
                    cell.id = 'cell-' + wall + '-' + row + '-' + num;
                    cell.textContent = num;
                    cell.title = wall + ' · row ' + row + ' · burner ' + num;
                    cell.addEventListener('click', (ev) => openPopover(ev, wall, row, num));
                    grid.appendChild(cell);
                }
            }
            card.appendChild(grid);
            const dist = document.createElement('div');
            dist.innerHTML = '<div class="dist-bar" id="bar-' + wall + '"></div>' +
                '<div class="dist-counts" id="dist-' + wall + '"></div>';
            card.appendChild(dist);
            container.appendChild(card);
        }
    }

    function paintCell(b) {
        const cell = $('cell-' + b.wall + '-' + b.row + '-' + b.burner_num);
        if (cell) cell.className = 'cell ' + b.state;
    }

    async function loadBurners() {
        const rows = await api('/api/burners');
        burners = new Map(rows.map(b => [keyOf(b), b]));
        rows.forEach(paintCell);
        refreshAnalytics();
    }

    // Popover-driven state change, applied optimistically
    let popTarget = null;

    function openPopover(ev, wall, row, num) {
        popTarget = { wall, row, num };
        const pop = $('popover');
        $('pop-title').textContent = 'Wall ' + wall + ' · row ' + row + ' · burner ' + num;
        pop.classList.add('open');
        pop.style.left = Math.min(ev.clientX, window.innerWidth - 180) + 'px';
        pop.style.top = Math.min(ev.clientY, window.innerHeight - 200) + 'px';
        ev.stopPropagation();
    }

    document.addEventListener('click', () => $('popover').classList.remove('open'));

    $('popover').addEventListener('click', async (ev) => {
        const state = ev.target.dataset && ev.target.dataset.state;
        if (!state || !popTarget) return;
        $('popover').classList.remove('open');

        const { wall, row, num } = popTarget;
        const key = wall + '/' + row + '/' + num;
        const prior = burners.get(key);

        // Optimistic paint; the change feed carries the authoritative row,
        // including the revert if the write fails server side.
        paintCell({ wall, row, burner_num: num, state });
        try {
            const updated = await api('/api/burners/' + wall + '/' + row + '/' + num, {
                method: 'PUT',
                body: JSON.stringify({ state })
            });
            burners.set(key, updated);
        } catch (e) {
            if (prior) paintCell(prior);
        }
        refreshAnalytics();
    });

    // --- Change feed ---

    function subscribe() {
        if (source) source.close();
        source = new EventSource('/api/burners/stream?token=' + encodeURIComponent(token));
        source.addEventListener('open', () => {
            $('conn-state').textContent = 'live';
            $('conn-state').classList.add('live');
        });
        source.addEventListener('burner', (ev) => {
            const b = JSON.parse(ev.data);
            burners.set(keyOf(b), b);
            paintCell(b);
            refreshAnalytics();
        });
        source.addEventListener('error', () => {
            $('conn-state').textContent = 'reconnecting…';
            $('conn-state').classList.remove('live');
        });
    }

    // --- Analytics ---

    async function refreshAnalytics() {
        let walls;
        try { walls = await api('/api/analytics/walls'); } catch (e) { return; }

        const body = $('analytics-body');
        body.innerHTML = '';
        for (const w of walls) {
            const tr = document.createElement('tr');
            tr.innerHTML = '<td>Wall ' + w.wall + '</td><td>' + w.counts.both + '</td><td>' +
                w.counts.ng_only + '</td><td>' + w.counts.off_gas + '</td><td>' + w.counts.capped +
                '</td><td>' + w.imbalance + '</td><td><span class="badge ' + w.severity + '">' +
                w.severity + '</span></td>';
            body.appendChild(tr);

            // Per-wall distribution shown alongside the grid
            const bar = $('bar-' + w.wall);
            if (bar) {
                bar.innerHTML =
                    '<span style="flex:' + w.counts.both + ';background:var(--both)"></span>' +
                    '<span style="flex:' + w.counts.ng_only + ';background:var(--ng)"></span>' +
                    '<span style="flex:' + w.counts.off_gas + ';background:var(--og)"></span>' +
                    '<span style="flex:' + w.counts.capped + ';background:var(--capped)"></span>';
            }
            const dist = $('dist-' + w.wall);
            if (dist) {
                dist.innerHTML = '<span>B ' + w.counts.both + '</span><span>N ' + w.counts.ng_only +
                    '</span><span>O ' + w.counts.off_gas + '</span><span>C ' + w.counts.capped +
                    '</span><span>|N − O| ' + w.imbalance + '</span><span class="badge ' +
                    w.severity + '">' + w.severity + '</span>';
            }
        }

        const active = walls.filter(w => w.severity !== 'normal');
        const alarms = $('alarms');
        if (active.length === 0) {
            alarms.innerHTML = '<div class="empty">No active alarms. All walls balanced.</div>';
        } else {
            alarms.innerHTML = active.map(w =>
                '<div style="margin-bottom:0.5rem"><span class="badge ' + w.severity + '">' + w.severity +
                '</span> Wall ' + w.wall + ': NG/off-gas imbalance of ' + w.imbalance + '</div>').join('');
        }
    }

    // --- Temperature log ---

    function fmtNum(v) { return v === null || v === undefined ? '—' : v; }

    async function refreshTemps() {
        let rows;
        try { rows = await api('/api/temp-readings'); } catch (e) { return; }
        const body = $('temps-body');
        body.innerHTML = '';
        if (rows.length === 0) {
            body.innerHTML = '<tr><td colspan="8" class="empty">No readings recorded yet.</td></tr>';
            return;
        }
        for (const r of rows) {
            const tr = document.createElement('tr');
            tr.innerHTML = '<td>' + new Date(r.timestamp).toLocaleString() + '</td><td>' + r.shift +
                '</td><td>' + fmtNum(r.ab_cot) + '</td><td>' + fmtNum(r.cd_cot) +
                '</td><td>' + fmtNum(r.flue_gas) + '</td><td>' + fmtNum(r.excess_o2) +
                '</td><td>' + fmtNum(r.prereformer_max) + '</td><td>' + fmtNum(r.prereformer_min) + '</td>';
            body.appendChild(tr);
        }
    }

    function numOrNull(id) {
        const v = $(id).value;
        return v === '' ? null : Number(v);
    }

    async function saveTempReading() {
        const btn = $('temp-save');
        btn.disabled = true;
        $('temp-note').textContent = '';
        try {
            await api('/api/temp-readings', {
                method: 'POST',
                body: JSON.stringify({
                    shift: $('t-shift').value,
                    ab_cot: numOrNull('t-ab'),
                    cd_cot: numOrNull('t-cd'),
                    flue_gas: numOrNull('t-flue'),
                    excess_o2: numOrNull('t-o2'),
                    prereformer_max: numOrNull('t-premax'),
                    prereformer_min: numOrNull('t-premin')
                })
            });
            $('temp-note').textContent = 'Saved.';
            ['t-ab','t-cd','t-flue','t-o2','t-premax','t-premin'].forEach(id => $(id).value = '');
            refreshTemps();
        } catch (e) {
            $('temp-note').textContent = e.message;
        } finally {
            btn.disabled = false;
        }
    }

    // --- Burner data table ---

    const STATE_NAMES = { B: 'Both', N: 'NG only', O: 'Off-gas only', C: 'Capped' };

    function refreshData() {
        const body = $('data-body');
        body.innerHTML = '';
        for (const b of burners.values()) {
            const tr = document.createElement('tr');
            tr.innerHTML = '<td>' + b.wall + '</td><td>' + b.row + '</td><td>' + b.burner_num +
                '</td><td>' + (STATE_NAMES[b.state] || b.state) +
                '</td><td>' + new Date(b.updated_at).toLocaleString() + '</td>';
            body.appendChild(tr);
        }
    }

    // --- Cleaning log ---

    async function refreshCleaning() {
        let rows;
        try { rows = await api('/api/cleaning-history'); } catch (e) { return; }
        const body = $('cleaning-body');
        body.innerHTML = '';
        if (rows.length === 0) {
            body.innerHTML = '<tr><td colspan="2" class="empty">No cleaning events recorded yet.</td></tr>';
            return;
        }
        for (const r of rows) {
            const tr = document.createElement('tr');
            tr.innerHTML = '<td>' + r.wall + ' / R' + r.row + ' / B' + r.burner_num +
                '</td><td>' + new Date(r.cleaning_date).toLocaleString() + '</td>';
            body.appendChild(tr);
        }
    }

    // --- Tabs ---

    document.querySelectorAll('.tab-btn').forEach(btn => {
        btn.addEventListener('click', () => {
            document.querySelectorAll('.tab-btn').forEach(b => b.classList.remove('active'));
            document.querySelectorAll('.tab-panel').forEach(p => p.classList.remove('active'));
            btn.classList.add('active');
            $('tab-' + btn.dataset.tab).classList.add('active');
            if (btn.dataset.tab === 'data') refreshData();
            if (btn.dataset.tab === 'temps') refreshTemps();
            if (btn.dataset.tab === 'cleaning') refreshCleaning();
            if (btn.dataset.tab === 'alarms') refreshAnalytics();
        });
    });

    // --- Boot ---

    function showDashboard() {
        $('login-view').style.display = 'none';
        $('dash-view').style.display = 'block';
        $('who').textContent = employeeId;
        buildWalls();
        loadBurners().catch(() => {});
        subscribe();
    }

    $('login-btn').addEventListener('click', doLogin);
    $('password').addEventListener('keydown', (ev) => { if (ev.key === 'Enter') doLogin(); });
    $('logout-btn').addEventListener('click', doLogout);
    $('temp-save').addEventListener('click', saveTempReading);

    if (token) {
        showDashboard();
    } else {
        showLogin();
    }
})();
</script>
</body>
</html>"##;
